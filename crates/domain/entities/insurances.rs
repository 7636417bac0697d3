use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub daily_price: i64,
    pub coverage_limit: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertInsuranceEntity {
    pub name: String,
    pub description: Option<String>,
    pub daily_price: i64,
    pub coverage_limit: Option<i64>,
    pub is_active: bool,
}

pub type NewInsuranceEntity = InsertInsuranceEntity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateInsuranceEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
