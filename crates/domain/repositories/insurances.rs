use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::insurances::{
    InsuranceEntity, NewInsuranceEntity, UpdateInsuranceEntity,
};

#[automock]
#[async_trait]
pub trait InsuranceRepository {
    async fn create_insurance(&self, insurance: NewInsuranceEntity) -> Result<InsuranceEntity>;

    async fn find_insurance_by_id(&self, id: Uuid) -> Result<Option<InsuranceEntity>>;

    async fn list_insurances(&self, include_inactive: bool) -> Result<Vec<InsuranceEntity>>;

    async fn update_insurance(
        &self,
        id: Uuid,
        update: UpdateInsuranceEntity,
    ) -> Result<InsuranceEntity>;
}
