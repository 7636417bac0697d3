use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    AwaitingDeposit,
    Completed,
    Failed,
    Cancelled,
    Refunded,
    PartialRefund,
}

impl PaymentStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "awaiting_deposit" => Some(PaymentStatus::AwaitingDeposit),
            "completed" => Some(PaymentStatus::Completed),
            "failed" => Some(PaymentStatus::Failed),
            "cancelled" => Some(PaymentStatus::Cancelled),
            "refunded" => Some(PaymentStatus::Refunded),
            "partial_refund" => Some(PaymentStatus::PartialRefund),
            _ => None,
        }
    }

    /// Transition table for the payment lifecycle. Terminal states accept
    /// nothing except the completed -> refund follow-ups.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        match self {
            PaymentStatus::Pending | PaymentStatus::AwaitingDeposit => matches!(
                next,
                PaymentStatus::Completed | PaymentStatus::Failed | PaymentStatus::Cancelled
            ),
            PaymentStatus::Completed => {
                matches!(next, PaymentStatus::Refunded | PaymentStatus::PartialRefund)
            }
            PaymentStatus::PartialRefund => {
                matches!(next, PaymentStatus::Refunded | PaymentStatus::PartialRefund)
            }
            PaymentStatus::Failed | PaymentStatus::Cancelled | PaymentStatus::Refunded => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed
                | PaymentStatus::Failed
                | PaymentStatus::Cancelled
                | PaymentStatus::Refunded
        )
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::AwaitingDeposit => "awaiting_deposit",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::PartialRefund => "partial_refund",
        };
        write!(f, "{}", status)
    }
}
