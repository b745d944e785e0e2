/*
[INPUT]:  JSON-RPC style wallet requests (method + params)
[OUTPUT]: Raw provider results or provider errors carrying an RPC code
[POS]:    Wallet layer - wallet provider abstraction
[UPDATE]: When adding new wallet types or consuming new RPC methods
*/

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

pub const WALLET_REQUEST_PERMISSIONS: &str = "wallet_requestPermissions";
pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const PERSONAL_SIGN: &str = "personal_sign";

/// Request sent to a wallet provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            method: method.to_string(),
            params,
        }
    }

    pub fn without_params(method: &str) -> Self {
        Self::new(method, Value::Null)
    }
}

/// Error returned by a wallet provider
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderError {
    /// EIP-1193: the user rejected the request
    pub const USER_REJECTED_REQUEST: i64 = 4001;
    /// JSON-RPC: the method does not exist / is not available
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// JSON-RPC: invalid method parameters
    pub const INVALID_PARAMS: i64 = -32602;
    /// JSON-RPC: internal error
    pub const INTERNAL_ERROR: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            Self::METHOD_NOT_FOUND,
            format!("The method \"{method}\" does not exist / is not available."),
        )
    }

    pub fn user_rejected(message: impl Into<String>) -> Self {
        Self::new(Self::USER_REJECTED_REQUEST, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Self::USER_REJECTED_REQUEST
    }

    /// Whether the wallet does not implement the requested method.
    ///
    /// Some wallets only report the code inside their message text, so the
    /// rendered error is searched for `32601` as well.
    pub fn is_method_unsupported(&self) -> bool {
        self.code == Self::METHOD_NOT_FOUND || self.to_string().contains("32601")
    }
}

/// Capability surface of a wallet (browser extension, local key, hardware...)
///
/// The trait is async to support wallets reached over IPC or the network.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet is available in the current environment
    fn is_installed(&self) -> bool;

    /// Forward a JSON-RPC request to the wallet
    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError>;

    /// Start the wallet installation flow
    async fn start_onboarding(&self) -> Result<(), ProviderError>;
}

/// Scripted wallet provider for testing
///
/// Records every method it receives, in order.
#[derive(Debug)]
pub struct MockWalletProvider {
    installed: bool,
    permissions: Result<Value, ProviderError>,
    accounts: Vec<String>,
    signature: Result<Option<String>, ProviderError>,
    calls: Mutex<Vec<String>>,
    onboarding_count: AtomicUsize,
}

impl MockWalletProvider {
    /// Installed wallet exposing the given account and granting permission
    pub fn new(address: &str) -> Self {
        Self {
            installed: true,
            permissions: Ok(json!([{ "parentCapability": ETH_ACCOUNTS }])),
            accounts: vec![address.to_string()],
            signature: Ok(None),
            calls: Mutex::new(Vec::new()),
            onboarding_count: AtomicUsize::new(0),
        }
    }

    /// Environment without any wallet
    pub fn not_installed() -> Self {
        Self {
            installed: false,
            accounts: Vec::new(),
            ..Self::new("")
        }
    }

    pub fn with_accounts(mut self, accounts: &[&str]) -> Self {
        self.accounts = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_permissions_result(mut self, result: Result<Value, ProviderError>) -> Self {
        self.permissions = result;
        self
    }

    /// Fixed signature returned for every message
    pub fn with_signature(mut self, signature: &str) -> Self {
        self.signature = Ok(Some(signature.to_string()));
        self
    }

    pub fn with_signature_error(mut self, error: ProviderError) -> Self {
        self.signature = Err(error);
        self
    }

    /// Methods received so far
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn onboarding_count(&self) -> usize {
        self.onboarding_count.load(Ordering::SeqCst)
    }

    fn record(&self, method: &str) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(method.to_string());
    }

    fn sign(&self, params: &Value) -> Result<Value, ProviderError> {
        let message = params
            .get(0)
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::new(ProviderError::INVALID_PARAMS, "missing message"))?;

        match &self.signature {
            Ok(Some(signature)) => Ok(Value::String(signature.clone())),
            // Deterministic stand-in: hex of the message
            Ok(None) => Ok(Value::String(format!("0x{}", hex::encode(message)))),
            Err(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn is_installed(&self) -> bool {
        self.installed
    }

    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError> {
        self.record(&request.method);
        match request.method.as_str() {
            WALLET_REQUEST_PERMISSIONS => self.permissions.clone(),
            ETH_ACCOUNTS => Ok(json!(self.accounts)),
            PERSONAL_SIGN => self.sign(&request.params),
            other => Err(ProviderError::method_not_found(other)),
        }
    }

    async fn start_onboarding(&self) -> Result<(), ProviderError> {
        self.onboarding_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
