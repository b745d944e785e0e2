/*
[INPUT]:  WoM public API payloads
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the WoM API schema changes
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deed NFT as exposed by the WoM server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deed {
    #[serde(alias = "nftId")]
    pub id: u64,
    #[serde(default)]
    pub city: Option<i16>,
    #[serde(default)]
    pub card_type: Option<i16>,
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default)]
    pub manager_address: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One page of a WoM listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WomPage {
    #[serde(default, alias = "content")]
    pub items: Vec<Value>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}
