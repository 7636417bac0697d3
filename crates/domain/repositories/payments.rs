use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{NewPaymentEntity, PaymentEntity, UpdatePaymentEntity};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn create_payment(&self, payment: NewPaymentEntity) -> Result<PaymentEntity>;

    async fn find_payment_by_id(&self, id: Uuid) -> Result<Option<PaymentEntity>>;

    async fn find_payment_by_order_id(&self, order_id: &str) -> Result<Option<PaymentEntity>>;

    async fn update_payment(
        &self,
        id: Uuid,
        update: UpdatePaymentEntity,
    ) -> Result<PaymentEntity>;
}
