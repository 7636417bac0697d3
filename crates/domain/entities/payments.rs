use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
    settlement_statuses::SettlementStatus,
};

/// One row in `payments`: a single attempt to collect money for one
/// reservation. Sub-merchant ids are denormalized from the branch at
/// creation time so settlement webhooks can be matched without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub order_id: String,
    pub payment_key: Option<String>,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub branch_amount: i64,
    pub hq_amount: i64,
    pub branch_submerchant_id: String,
    pub hq_submerchant_id: String,
    pub branch_settlement_status: SettlementStatus,
    pub hq_settlement_status: SettlementStatus,
    pub settlement_status: SettlementStatus,
    pub branch_settled_amount: Option<i64>,
    pub hq_settled_amount: Option<i64>,
    pub branch_settled_at: Option<DateTime<Utc>>,
    pub hq_settled_at: Option<DateTime<Utc>>,
    pub settlement_error: Option<String>,
    pub card_company: Option<String>,
    pub card_number: Option<String>,
    pub va_bank: Option<String>,
    pub va_account_number: Option<String>,
    pub va_due_date: Option<DateTime<Utc>>,
    pub refunded_amount: Option<i64>,
    pub refund_reason: Option<String>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsertPaymentEntity {
    pub reservation_id: Uuid,
    pub order_id: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub branch_amount: i64,
    pub hq_amount: i64,
    pub branch_submerchant_id: String,
    pub hq_submerchant_id: String,
    pub branch_settlement_status: SettlementStatus,
    pub hq_settlement_status: SettlementStatus,
    pub settlement_status: SettlementStatus,
}

// NewPaymentEntity is the application-facing alias for inserting rows into `payments`.
pub type NewPaymentEntity = InsertPaymentEntity;

/// Partial update; only populated fields are written back.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePaymentEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq_settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_status: Option<SettlementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_settled_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq_settled_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_settled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hq_settled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub va_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub va_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub va_due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
