use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One franchise location. `submerchant_id` routes the branch share of a
/// split settlement; `subdomain` keys the branch micro-site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchEntity {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub submerchant_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
