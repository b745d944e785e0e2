/*
[INPUT]:  EVM private key (hex string)
[OUTPUT]: Wallet provider answering eth_accounts / personal_sign locally
[POS]:    Wallet layer - private-key wallet implementation
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::str::FromStr;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::http::{Result, TenantError};

use super::provider::{
    ETH_ACCOUNTS, PERSONAL_SIGN, ProviderError, RpcRequest, WALLET_REQUEST_PERMISSIONS,
    WalletProvider,
};

/// Wallet provider backed by a local EVM private key
///
/// Signs with EIP-191 `personal_sign` semantics, like a browser wallet would.
pub struct LocalWalletProvider {
    signer: PrivateKeySigner,
    address: String,
    supports_permissions: bool,
}

impl LocalWalletProvider {
    /// Create a provider from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.trim();
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| TenantError::Config(format!("Invalid EVM private key: {}", e)))?;

        let address = format!("0x{}", hex::encode(signer.address().as_slice()));

        Ok(Self {
            signer,
            address,
            supports_permissions: true,
        })
    }

    /// Behave like older wallets that reject `wallet_requestPermissions`
    pub fn without_permission_requests(mut self) -> Self {
        self.supports_permissions = false;
        self
    }

    /// Lowercase hex address of the key
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn personal_sign(&self, params: &Value) -> std::result::Result<Value, ProviderError> {
        let (message, address) = match params.as_array().map(Vec::as_slice) {
            Some([Value::String(message), Value::String(address), ..]) => (message, address),
            _ => {
                return Err(ProviderError::new(
                    ProviderError::INVALID_PARAMS,
                    "personal_sign expects [message, address]",
                ));
            }
        };

        if !address.eq_ignore_ascii_case(&self.address) {
            return Err(ProviderError::new(
                ProviderError::INVALID_PARAMS,
                format!("Unknown account {address}"),
            ));
        }

        let signature = self
            .signer
            .sign_message(&message_bytes(message))
            .await
            .map_err(|e| ProviderError::new(ProviderError::INTERNAL_ERROR, e.to_string()))?;

        // alloy's Signature as_bytes() returns [r, s, v]
        Ok(Value::String(format!("0x{}", hex::encode(signature.as_bytes()))))
    }
}

impl std::fmt::Debug for LocalWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWalletProvider")
            .field("address", &self.address)
            .field("supports_permissions", &self.supports_permissions)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    fn is_installed(&self) -> bool {
        true
    }

    async fn request(&self, request: RpcRequest) -> std::result::Result<Value, ProviderError> {
        debug!(method = %request.method, "local wallet request");
        match request.method.as_str() {
            WALLET_REQUEST_PERMISSIONS if self.supports_permissions => Ok(json!([{
                "parentCapability": ETH_ACCOUNTS,
                "caveats": [{ "type": "restrictReturnedAccounts", "value": [self.address] }],
            }])),
            ETH_ACCOUNTS => Ok(json!([self.address])),
            PERSONAL_SIGN => self.personal_sign(&request.params).await,
            other => Err(ProviderError::method_not_found(other)),
        }
    }

    async fn start_onboarding(&self) -> std::result::Result<(), ProviderError> {
        Ok(())
    }
}

/// Hex-prefixed messages are signed as raw bytes, anything else as UTF-8
fn message_bytes(message: &str) -> Vec<u8> {
    message
        .strip_prefix("0x")
        .and_then(|raw| hex::decode(raw).ok())
        .unwrap_or_else(|| message.as_bytes().to_vec())
}
