use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::insurances::{InsuranceEntity, NewInsuranceEntity, UpdateInsuranceEntity},
        repositories::insurances::InsuranceRepository,
    },
    infra::supabase::rest_client::SupabaseRestClient,
};

pub struct InsuranceSupabase {
    client: Arc<SupabaseRestClient>,
}

impl InsuranceSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InsuranceRepository for InsuranceSupabase {
    async fn create_insurance(&self, insurance: NewInsuranceEntity) -> Result<InsuranceEntity> {
        self.client.insert("insurances", &insurance).await
    }

    async fn find_insurance_by_id(&self, id: Uuid) -> Result<Option<InsuranceEntity>> {
        let rows: Vec<InsuranceEntity> = self
            .client
            .select(
                "insurances",
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_insurances(&self, include_inactive: bool) -> Result<Vec<InsuranceEntity>> {
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("order", "daily_price.asc".to_string()),
        ];
        if !include_inactive {
            query.push(("is_active", "is.true".to_string()));
        }
        self.client.select("insurances", &query).await
    }

    async fn update_insurance(
        &self,
        id: Uuid,
        update: UpdateInsuranceEntity,
    ) -> Result<InsuranceEntity> {
        self.client
            .update("insurances", &[("id", format!("eq.{}", id))], &update)
            .await
    }
}
