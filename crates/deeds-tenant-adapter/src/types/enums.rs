/*
[INPUT]:  Hub REST schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new status values are added
*/

use serde::{Deserialize, Serialize};

/// Lifecycle of a hub reward report as tracked locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HubReportStatus {
    None,
    Sending,
    Sent,
    ErrorSending,
    PendingReward,
    Rewarded,
    Rejected,
    Invalid,
    #[serde(other)]
    Unknown,
}

impl HubReportStatus {
    /// Whether the report has been accepted by the WoM
    pub fn is_sent(self) -> bool {
        matches!(
            self,
            HubReportStatus::Sent | HubReportStatus::PendingReward | HubReportStatus::Rewarded
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardPeriodType {
    Week,
    Month,
    Quarter,
    Semester,
    Year,
    #[serde(other)]
    Unknown,
}
