/*
[INPUT]:  Hub REST schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{HubReportStatus, RewardPeriodType};

/// Hub as known by the WoM, plus local connection state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    #[serde(default = "serde_helpers::unset_id")]
    pub deed_id: i64,
    #[serde(default = "serde_helpers::unset_index")]
    pub city: i16,
    #[serde(default = "serde_helpers::unset_index")]
    pub r#type: i16,
    #[serde(default)]
    pub address: Option<String>,
    /// Localized names keyed by language
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    #[serde(default)]
    pub description: BTreeMap<String, String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub hub_owner_address: Option<String>,
    #[serde(default)]
    pub deed_owner_address: Option<String>,
    #[serde(default)]
    pub deed_manager_address: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub users_count: u64,
    #[serde(default)]
    pub rewards_period_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub rewards_per_period: Decimal,
    #[serde(default)]
    pub connected: bool,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub owner_claimable_amount: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub manager_claimable_amount: Decimal,
    /// Tenant-only fields (WoM server URL, contract addresses...) pass through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Hub {
    /// A deed id of -1 means the hub was never bound to a deed
    pub fn has_deed(&self) -> bool {
        self.deed_id >= 0
    }
}

/// Hub configuration returned by `GET hub/configuration`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubConfiguration {
    #[serde(default)]
    pub wom_server_url: Option<String>,
    #[serde(default)]
    pub admin_address: Option<String>,
    #[serde(default)]
    pub wom_address: Option<String>,
    #[serde(default)]
    pub uem_address: Option<String>,
    #[serde(default)]
    pub network_id: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Reward report with its local sending state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubReport {
    #[serde(default)]
    pub report_id: i64,
    #[serde(default)]
    pub period_id: i64,
    #[serde(default)]
    pub hub_address: Option<String>,
    #[serde(default = "serde_helpers::unset_id")]
    pub deed_id: i64,
    #[serde(default)]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub period_type: Option<String>,
    #[serde(default)]
    pub users_count: u64,
    #[serde(default)]
    pub participants_count: u64,
    #[serde(default)]
    pub recipients_count: u64,
    #[serde(default)]
    pub achievements_count: u64,
    #[serde(default)]
    pub reward_token_address: Option<String>,
    #[serde(default)]
    pub reward_token_network_id: u64,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub hub_reward_amount: Decimal,
    #[serde(default)]
    pub transactions: Vec<String>,
    #[serde(default)]
    pub can_refresh: bool,
    #[serde(default)]
    pub can_send: bool,
    #[serde(default = "serde_helpers::default_report_status")]
    pub status: HubReportStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// Hub summary returned by `GET deed/tenant/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubStatus {
    #[serde(default = "serde_helpers::unset_id")]
    pub deed_id: i64,
    #[serde(default)]
    pub city: i16,
    #[serde(default)]
    pub r#type: i16,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub deed_manager_address: Option<String>,
    #[serde(default)]
    pub earner_address: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub rewards_amount: Decimal,
    #[serde(default)]
    pub rewards_period: Option<RewardPeriodType>,
    #[serde(default)]
    pub users_count: u64,
}

/// Deed tenant provisioning state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeedTenant {
    pub nft_id: u64,
    #[serde(default = "serde_helpers::unset_index")]
    pub city_index: i16,
    #[serde(default = "serde_helpers::unset_index")]
    pub card_type: i16,
    #[serde(default)]
    pub provisioned: bool,
    #[serde(default)]
    pub manager_address: Option<String>,
}

mod serde_helpers {
    use super::{Decimal, HubReportStatus};
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn unset_id() -> i64 {
        -1
    }

    pub fn unset_index() -> i16 {
        -1
    }

    pub fn default_report_status() -> HubReportStatus {
        HubReportStatus::None
    }

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Decimal::ZERO);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(Decimal::ZERO);
            }
            return Decimal::from_str(raw).map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            let raw = value.to_string();
            return Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    // The server models amounts as doubles
    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.to_f64().unwrap_or_default())
    }
}
