use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
}

impl VehicleStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "available" => Some(VehicleStatus::Available),
            "rented" => Some(VehicleStatus::Rented),
            _ => None,
        }
    }
}

impl Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
        };
        write!(f, "{}", status)
    }
}
