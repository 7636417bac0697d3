use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "card")]
    Card,
    #[serde(rename = "virtualAccount")]
    VirtualAccount,
}

impl PaymentMethod {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "card" => Some(PaymentMethod::Card),
            "virtualAccount" => Some(PaymentMethod::VirtualAccount),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::VirtualAccount => "virtualAccount",
        };
        write!(f, "{}", method)
    }
}
