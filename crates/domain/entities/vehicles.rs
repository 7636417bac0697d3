use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::vehicle_statuses::VehicleStatus;

/// One rentable asset owned by a branch. `is_active = false` is the
/// soft-delete flag; `status` tracks rental availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleEntity {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    pub fuel_type: Option<String>,
    pub seats: Option<i32>,
    pub daily_price: i64,
    pub image_url: Option<String>,
    pub status: VehicleStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertVehicleEntity {
    pub branch_id: Uuid,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    pub fuel_type: Option<String>,
    pub seats: Option<i32>,
    pub daily_price: i64,
    pub image_url: Option<String>,
    pub status: VehicleStatus,
    pub is_active: bool,
}

pub type NewVehicleEntity = InsertVehicleEntity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVehicleEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
