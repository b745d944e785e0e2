/*
[INPUT]:  Raw wallet signatures or serialized signed tokens
[OUTPUT]: Prefixed signed-message tokens
[POS]:    Wallet layer - signed token format
[UPDATE]: When the signed message wire format changes
*/

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::http::{Result, TenantError};

/// Marker the server expects in front of a wallet signature
pub const SIGNED_MESSAGE_PREFIX: &str = "SIGNED_MESSAGE@";

/// Wallet signature wrapped for transport: `SIGNED_MESSAGE@<signature>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignedToken(String);

impl SignedToken {
    pub fn from_signature(signature: &str) -> Self {
        Self(format!("{SIGNED_MESSAGE_PREFIX}{signature}"))
    }

    /// Parse a token received from elsewhere; a missing prefix means the
    /// signing flow did not complete.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.strip_prefix(SIGNED_MESSAGE_PREFIX) {
            Some(signature) if !signature.is_empty() => Ok(Self(raw.to_string())),
            Some(_) => Err(TenantError::InvalidToken("empty signature".to_string())),
            None => Err(TenantError::InvalidToken(format!(
                "missing {SIGNED_MESSAGE_PREFIX} prefix"
            ))),
        }
    }

    /// Signature as returned by the wallet
    pub fn signature(&self) -> &str {
        &self.0[SIGNED_MESSAGE_PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SignedToken {
    type Error = TenantError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SignedToken> for String {
    fn from(token: SignedToken) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signature() {
        let token = SignedToken::from_signature("0xdeadbeef");
        assert_eq!(token.as_str(), "SIGNED_MESSAGE@0xdeadbeef");
        assert_eq!(token.signature(), "0xdeadbeef");
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert!(matches!(
            SignedToken::parse("0xdeadbeef"),
            Err(TenantError::InvalidToken(_))
        ));
        assert!(matches!(
            SignedToken::parse("SIGNED_MESSAGE@"),
            Err(TenantError::InvalidToken(_))
        ));
        assert_eq!(
            SignedToken::parse("SIGNED_MESSAGE@0x01").unwrap().signature(),
            "0x01"
        );
    }

    #[test]
    fn test_deserialize_validates_prefix() {
        let token: SignedToken = serde_json::from_str(r#""SIGNED_MESSAGE@0x01""#).unwrap();
        assert_eq!(token.signature(), "0x01");
        assert!(serde_json::from_str::<SignedToken>(r#""0x01""#).is_err());
    }
}
