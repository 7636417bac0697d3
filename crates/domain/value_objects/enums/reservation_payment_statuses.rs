use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationPaymentStatus {
    #[default]
    Unpaid,
    Awaiting,
    Paid,
    Refunded,
    Expired,
}

impl ReservationPaymentStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(ReservationPaymentStatus::Unpaid),
            "awaiting" => Some(ReservationPaymentStatus::Awaiting),
            "paid" => Some(ReservationPaymentStatus::Paid),
            "refunded" => Some(ReservationPaymentStatus::Refunded),
            "expired" => Some(ReservationPaymentStatus::Expired),
            _ => None,
        }
    }
}

impl Display for ReservationPaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ReservationPaymentStatus::Unpaid => "unpaid",
            ReservationPaymentStatus::Awaiting => "awaiting",
            ReservationPaymentStatus::Paid => "paid",
            ReservationPaymentStatus::Refunded => "refunded",
            ReservationPaymentStatus::Expired => "expired",
        };
        write!(f, "{}", status)
    }
}
