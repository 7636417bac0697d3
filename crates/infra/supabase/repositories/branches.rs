use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{entities::branches::BranchEntity, repositories::branches::BranchRepository},
    infra::supabase::rest_client::SupabaseRestClient,
};

pub struct BranchSupabase {
    client: Arc<SupabaseRestClient>,
}

impl BranchSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }

    async fn find_one(&self, column: &'static str, value: &str) -> Result<Option<BranchEntity>> {
        let rows: Vec<BranchEntity> = self
            .client
            .select(
                "branches",
                &[
                    ("select", "*".to_string()),
                    (column, format!("eq.{}", value)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl BranchRepository for BranchSupabase {
    async fn find_branch_by_id(&self, id: Uuid) -> Result<Option<BranchEntity>> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_branch_by_subdomain(&self, subdomain: &str) -> Result<Option<BranchEntity>> {
        self.find_one("subdomain", subdomain).await
    }

    async fn find_branch_by_name(&self, name: &str) -> Result<Option<BranchEntity>> {
        self.find_one("name", name).await
    }

    async fn search_branches_by_name_prefix(&self, prefix: &str) -> Result<Vec<BranchEntity>> {
        self.client
            .select(
                "branches",
                &[
                    ("select", "*".to_string()),
                    ("name", format!("ilike.{}%", prefix)),
                    ("order", "name.asc".to_string()),
                ],
            )
            .await
    }

    async fn list_active_branches(&self) -> Result<Vec<BranchEntity>> {
        self.client
            .select(
                "branches",
                &[
                    ("select", "*".to_string()),
                    ("is_active", "is.true".to_string()),
                    ("order", "name.asc".to_string()),
                ],
            )
            .await
    }
}
