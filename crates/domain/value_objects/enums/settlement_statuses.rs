use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl SettlementStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(SettlementStatus::Pending),
            "processing" => Some(SettlementStatus::Processing),
            "completed" => Some(SettlementStatus::Completed),
            "failed" => Some(SettlementStatus::Failed),
            _ => None,
        }
    }
}

impl Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Processing => "processing",
            SettlementStatus::Completed => "completed",
            SettlementStatus::Failed => "failed",
        };
        write!(f, "{}", status)
    }
}
