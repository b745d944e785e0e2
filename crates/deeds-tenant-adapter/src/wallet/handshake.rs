/*
[INPUT]:  Caller-supplied challenge and a wallet provider
[OUTPUT]: Wallet-signed token, onboarding notice, or classified wallet error
[POS]:    Wallet layer - orchestrates the wallet authentication handshake
[UPDATE]: When handshake steps, negotiation tolerance, or token format change
*/

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::http::{Result, TenantError};

use super::provider::{
    ETH_ACCOUNTS, PERSONAL_SIGN, ProviderError, RpcRequest, WALLET_REQUEST_PERMISSIONS,
    WalletProvider,
};
use super::SignedToken;

/// Steps of a single handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    NotStarted,
    CheckingInstallation,
    Onboarding,
    NegotiatingPermission,
    RetrievingAddress,
    Signing,
    Done,
}

/// Terminal, non-error results of [`HandshakeController::authenticate`]
#[derive(Debug, Clone, PartialEq)]
pub enum HandshakeOutcome {
    /// Challenge signed by `address`
    Signed { token: SignedToken, address: String },
    /// No wallet was found; installation was started and the caller must
    /// authenticate again once the user is done.
    OnboardingStarted,
}

impl HandshakeOutcome {
    pub fn token(&self) -> Option<&SignedToken> {
        match self {
            HandshakeOutcome::Signed { token, .. } => Some(token),
            HandshakeOutcome::OnboardingStarted => None,
        }
    }
}

/// Result of asking the wallet for account access
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiationOutcome {
    /// Permission granted for this many entries
    Granted(usize),
    /// Wallet predates `wallet_requestPermissions`
    Unsupported,
    Denied(ProviderError),
}

impl NegotiationOutcome {
    pub fn classify(result: std::result::Result<Value, ProviderError>) -> Self {
        match result {
            Ok(value) => NegotiationOutcome::Granted(value.as_array().map_or(0, Vec::len)),
            Err(err) if err.is_method_unsupported() => NegotiationOutcome::Unsupported,
            Err(err) => NegotiationOutcome::Denied(err),
        }
    }
}

/// Drives a wallet through permission, address and signature requests
///
/// Holds no state between calls: every handshake reads the address afresh.
#[derive(Clone)]
pub struct HandshakeController {
    provider: Arc<dyn WalletProvider>,
}

impl HandshakeController {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }

    pub fn is_installed(&self) -> bool {
        self.provider.is_installed()
    }

    /// Sign `challenge` with the wallet's active account
    ///
    /// 1. Start onboarding if no wallet is installed
    /// 2. Request account permission (skipped on mobile wallet browsers)
    /// 3. Read the active address
    /// 4. Request a personal signature over the challenge
    /// 5. Prefix the signature
    pub async fn authenticate(&self, challenge: &str, is_mobile: bool) -> Result<HandshakeOutcome> {
        let mut state = HandshakeState::NotStarted;
        let result = self.run(challenge, is_mobile, &mut state).await;
        match &result {
            Ok(HandshakeOutcome::Signed { address, .. }) => {
                info!(%address, "wallet handshake completed");
            }
            Ok(HandshakeOutcome::OnboardingStarted) => {
                info!("no wallet installed, onboarding started");
            }
            Err(err) => {
                debug!(?state, error = %err, "wallet handshake failed");
            }
        }
        result
    }

    async fn run(
        &self,
        challenge: &str,
        is_mobile: bool,
        state: &mut HandshakeState,
    ) -> Result<HandshakeOutcome> {
        advance(state, HandshakeState::CheckingInstallation);
        if !self.provider.is_installed() {
            advance(state, HandshakeState::Onboarding);
            self.provider
                .start_onboarding()
                .await
                .map_err(TenantError::from_provider)?;
            return Ok(HandshakeOutcome::OnboardingStarted);
        }

        if !is_mobile {
            advance(state, HandshakeState::NegotiatingPermission);
            match self.negotiate_permission().await {
                NegotiationOutcome::Granted(0) => return Err(TenantError::NoAccountSelected),
                NegotiationOutcome::Granted(_) => {}
                NegotiationOutcome::Unsupported => {
                    warn!("wallet does not support permission requests, continuing");
                }
                NegotiationOutcome::Denied(err) => return Err(TenantError::from_provider(err)),
            }
        }

        advance(state, HandshakeState::RetrievingAddress);
        let address = self
            .retrieve_address()
            .await?
            .ok_or(TenantError::NoAccountAvailable)?;

        advance(state, HandshakeState::Signing);
        let signature = self.sign(challenge, &address).await?;

        advance(state, HandshakeState::Done);
        Ok(HandshakeOutcome::Signed {
            token: SignedToken::from_signature(&signature),
            address,
        })
    }

    /// Ask the wallet for `eth_accounts` permission
    pub async fn negotiate_permission(&self) -> NegotiationOutcome {
        let request = RpcRequest::new(WALLET_REQUEST_PERMISSIONS, json!([{ "eth_accounts": {} }]));
        NegotiationOutcome::classify(self.provider.request(request).await)
    }

    /// First account exposed by the wallet, lowercased
    pub async fn retrieve_address(&self) -> Result<Option<String>> {
        let accounts = self
            .provider
            .request(RpcRequest::without_params(ETH_ACCOUNTS))
            .await
            .map_err(TenantError::from_provider)?;

        let address = accounts
            .as_array()
            .and_then(|accounts| accounts.first())
            .and_then(Value::as_str)
            .filter(|address| !address.is_empty())
            .map(str::to_ascii_lowercase);
        Ok(address)
    }

    async fn sign(&self, challenge: &str, address: &str) -> Result<String> {
        let request = RpcRequest::new(PERSONAL_SIGN, json!([challenge, address]));
        let signature = self
            .provider
            .request(request)
            .await
            .map_err(TenantError::from_provider)?;

        match signature {
            Value::String(signature) if !signature.is_empty() => Ok(signature),
            other => Err(TenantError::InvalidResponse(format!(
                "personal_sign returned {other}"
            ))),
        }
    }
}

fn advance(state: &mut HandshakeState, next: HandshakeState) {
    debug!(from = ?state, to = ?next, "handshake state");
    *state = next;
}
