use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    reservation_payment_statuses::ReservationPaymentStatus,
    reservation_statuses::ReservationStatus,
};

/// One booking of one vehicle for a date range at one branch. Rows are
/// never hard-deleted; cancellation is a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationEntity {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub pickup_location: Option<String>,
    pub return_location: Option<String>,
    pub rental_price: i64,
    pub insurance_id: Option<Uuid>,
    pub insurance_price: i64,
    pub total_price: i64,
    pub status: ReservationStatus,
    pub payment_status: ReservationPaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsertReservationEntity {
    pub branch_id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub pickup_location: Option<String>,
    pub return_location: Option<String>,
    pub rental_price: i64,
    pub insurance_id: Option<Uuid>,
    pub insurance_price: i64,
    pub total_price: i64,
    pub status: ReservationStatus,
    pub payment_status: ReservationPaymentStatus,
}

pub type NewReservationEntity = InsertReservationEntity;

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReservationEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<ReservationPaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
