/*
[INPUT]:  Hub REST schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use crate::wallet::SignedToken;

/// Body of `POST hub` and `POST deed/tenant/connect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WomConnectionRequest {
    pub deed_id: u64,
    pub deed_manager_address: String,
    pub earner_address: String,
    pub signed_message: SignedToken,
    /// Exact message the wallet signed
    pub raw_message: String,
    pub token: String,
}

/// Body of `DELETE hub` and `POST deed/tenant/disconnect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WomDisconnectionRequest {
    pub deed_manager_address: String,
    pub signed_message: SignedToken,
    pub raw_message: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_request_wire_format() {
        let request = WomConnectionRequest {
            deed_id: 2,
            deed_manager_address: "0xabc".to_string(),
            earner_address: "0xdef".to_string(),
            signed_message: SignedToken::from_signature("0x1234"),
            raw_message: "token".to_string(),
            token: "token".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "deedId": 2,
                "deedManagerAddress": "0xabc",
                "earnerAddress": "0xdef",
                "signedMessage": "SIGNED_MESSAGE@0x1234",
                "rawMessage": "token",
                "token": "token",
            })
        );
    }

    #[test]
    fn test_disconnection_request_wire_format() {
        let request = WomDisconnectionRequest {
            deed_manager_address: "0xabc".to_string(),
            signed_message: SignedToken::from_signature("0x1234"),
            raw_message: "token".to_string(),
            token: "token".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "deedManagerAddress": "0xabc",
                "signedMessage": "SIGNED_MESSAGE@0x1234",
                "rawMessage": "token",
                "token": "token",
            })
        );
    }
}
