use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Confirmed,
    InUse,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReservationStatus::Pending),
            "approved" => Some(ReservationStatus::Approved),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "in_use" => Some(ReservationStatus::InUse),
            "completed" => Some(ReservationStatus::Completed),
            "cancelled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    /// pending -> approved -> confirmed -> in_use -> completed, with
    /// cancellation allowed from every non-terminal state.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        if next == ReservationStatus::Cancelled {
            return !matches!(
                self,
                ReservationStatus::Completed | ReservationStatus::Cancelled
            );
        }
        match self {
            ReservationStatus::Pending => matches!(
                next,
                ReservationStatus::Approved | ReservationStatus::Confirmed
            ),
            ReservationStatus::Approved => matches!(next, ReservationStatus::Confirmed),
            ReservationStatus::Confirmed => matches!(next, ReservationStatus::InUse),
            ReservationStatus::InUse => matches!(next, ReservationStatus::Completed),
            ReservationStatus::Completed | ReservationStatus::Cancelled => false,
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::InUse => "in_use",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}
