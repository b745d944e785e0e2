/*
[INPUT]:  Error sources (HTTP transport, classified remote failures, serialization, wallet provider)
[OUTPUT]: Structured error types with stable message keys
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing the message key policy
*/

use thiserror::Error;

use crate::http::response::GENERIC_ERROR_KEY;
use crate::wallet::ProviderError;

/// Main error type for the tenant adapter
#[derive(Error, Debug)]
pub enum TenantError {
    /// Request never reached the server (DNS, TLS, connection reset...)
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered 503, 400 or 401 with a message key
    #[error("Remote error: {key}")]
    Remote { key: String },

    /// Server answered with any other non-success status
    #[error("Remote error: wom.errorResponse")]
    GenericRemote,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server or wallet
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wallet provider failed
    #[error("Wallet provider error: {0}")]
    Wallet(ProviderError),

    /// Permission dialog closed without selecting an account
    #[error("No selected account")]
    NoAccountSelected,

    /// Wallet exposes no account
    #[error("No account available in wallet")]
    NoAccountAvailable,

    /// User declined a wallet prompt
    #[error("User rejected the wallet request")]
    UserRejected,

    /// Signed token is malformed
    #[error("Invalid signed token: {0}")]
    InvalidToken(String),
}

impl TenantError {
    /// Message key a UI renders for classified remote failures
    pub fn message_key(&self) -> Option<&str> {
        match self {
            TenantError::Remote { key } => Some(key),
            TenantError::GenericRemote => Some(GENERIC_ERROR_KEY),
            _ => None,
        }
    }

    /// Check if the user cancelled a wallet prompt
    ///
    /// Declining is a legitimate choice; callers usually abort silently.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, TenantError::UserRejected)
    }

    /// Check if the error originates from the wallet side of the handshake
    pub fn is_wallet_error(&self) -> bool {
        matches!(
            self,
            TenantError::Wallet(_)
                | TenantError::NoAccountSelected
                | TenantError::NoAccountAvailable
                | TenantError::UserRejected
        )
    }

    /// Map a provider failure, pulling user rejections out into their own variant
    pub fn from_provider(err: ProviderError) -> Self {
        if err.is_user_rejection() {
            TenantError::UserRejected
        } else {
            TenantError::Wallet(err)
        }
    }

    pub fn remote(key: impl Into<String>) -> Self {
        TenantError::Remote { key: key.into() }
    }
}

/// Result type alias for tenant operations
pub type Result<T> = std::result::Result<T, TenantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_key() {
        let err = TenantError::remote("tenant.notFound");
        assert_eq!(err.message_key(), Some("tenant.notFound"));
        assert_eq!(TenantError::GenericRemote.message_key(), Some("wom.errorResponse"));
        assert_eq!(TenantError::NoAccountAvailable.message_key(), None);
    }

    #[test]
    fn test_wallet_error_classification() {
        assert!(TenantError::UserRejected.is_wallet_error());
        assert!(TenantError::UserRejected.is_user_rejection());
        assert!(TenantError::NoAccountSelected.is_wallet_error());
        assert!(!TenantError::GenericRemote.is_wallet_error());
    }

    #[test]
    fn test_from_provider_user_rejection() {
        let err = TenantError::from_provider(ProviderError::new(4001, "User denied message signature"));
        assert!(err.is_user_rejection());

        let err = TenantError::from_provider(ProviderError::new(-32603, "Internal error"));
        match err {
            TenantError::Wallet(inner) => assert_eq!(inner.code, -32603),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
