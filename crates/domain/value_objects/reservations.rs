use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    reservation_payment_statuses::ReservationPaymentStatus,
    reservation_statuses::ReservationStatus,
};

/// Query-parameter filter for reservation listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationFilter {
    pub branch_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub status: Option<ReservationStatus>,
    pub payment_status: Option<ReservationPaymentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Customer-facing booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationModel {
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
    pub insurance_price: Option<i64>,
}
