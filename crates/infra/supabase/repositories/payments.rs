use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::payments::{NewPaymentEntity, PaymentEntity, UpdatePaymentEntity},
        repositories::payments::PaymentRepository,
    },
    infra::supabase::rest_client::SupabaseRestClient,
};

pub struct PaymentSupabase {
    client: Arc<SupabaseRestClient>,
}

impl PaymentSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentRepository for PaymentSupabase {
    async fn create_payment(&self, payment: NewPaymentEntity) -> Result<PaymentEntity> {
        self.client.insert("payments", &payment).await
    }

    async fn find_payment_by_id(&self, id: Uuid) -> Result<Option<PaymentEntity>> {
        let rows: Vec<PaymentEntity> = self
            .client
            .select(
                "payments",
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn find_payment_by_order_id(&self, order_id: &str) -> Result<Option<PaymentEntity>> {
        let rows: Vec<PaymentEntity> = self
            .client
            .select(
                "payments",
                &[
                    ("select", "*".to_string()),
                    ("order_id", format!("eq.{}", order_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_payment(
        &self,
        id: Uuid,
        update: UpdatePaymentEntity,
    ) -> Result<PaymentEntity> {
        self.client
            .update("payments", &[("id", format!("eq.{}", id))], &update)
            .await
    }
}
