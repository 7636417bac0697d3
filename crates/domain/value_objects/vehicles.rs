use serde::Deserialize;
use uuid::Uuid;

use crate::domain::value_objects::enums::vehicle_statuses::VehicleStatus;

/// Query-parameter filter for vehicle listings. `is_active` defaults to
/// showing only non-soft-deleted rows at the repository level.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    pub branch_id: Option<Uuid>,
    pub status: Option<VehicleStatus>,
    pub is_active: Option<bool>,
}
