use serde::{Deserialize, Serialize};

pub const EVENT_PAYMENT_STATUS_CHANGED: &str = "PAYMENT_STATUS_CHANGED";
pub const EVENT_SETTLEMENT_COMPLETED: &str = "SETTLEMENT_COMPLETED";
pub const EVENT_SETTLEMENT_FAILED: &str = "SETTLEMENT_FAILED";

/// Inbound gateway webhook envelope. `data` stays untyped until the
/// event type tag is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TossWebhookEvent {
    pub secret: Option<String>,
    #[serde(rename = "eventType")]
    pub event_type: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusChangedData {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub status: String,
    #[serde(rename = "paymentKey")]
    pub payment_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementEventData {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "subMerchantId")]
    pub sub_merchant_id: String,
    pub amount: Option<i64>,
    pub reason: Option<String>,
}
