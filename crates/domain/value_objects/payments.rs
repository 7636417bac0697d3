use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Gateway order parameters returned to the checkout page after a payment
/// row is created. Field names follow the Toss Payments widget contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderDto {
    pub payment_id: Uuid,
    pub order_id: String,
    pub order_name: String,
    pub amount: i64,
    pub customer_name: String,
    pub success_url: String,
    pub fail_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VirtualAccountDto {
    pub payment_id: Uuid,
    pub bank: String,
    pub account_number: String,
    pub due_date: Option<DateTime<Utc>>,
    pub amount: i64,
}
