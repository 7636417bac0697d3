use std::sync::Arc;

use chanolja::domain::{
    entities::insurances::{InsuranceEntity, NewInsuranceEntity, UpdateInsuranceEntity},
    repositories::insurances::InsuranceRepository,
};
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InsuranceError {
    #[error("보험 상품을 찾을 수 없습니다")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl InsuranceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InsuranceError::NotFound => StatusCode::NOT_FOUND,
            InsuranceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, InsuranceError>;

pub struct InsuranceUseCase<I>
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    insurance_repo: Arc<I>,
}

impl<I> InsuranceUseCase<I>
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    pub fn new(insurance_repo: Arc<I>) -> Self {
        Self { insurance_repo }
    }

    pub async fn create_insurance(
        &self,
        insurance: NewInsuranceEntity,
    ) -> UseCaseResult<InsuranceEntity> {
        let created = self
            .insurance_repo
            .create_insurance(insurance)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "insurances: insert failed");
                InsuranceError::Internal(err)
            })?;
        info!(insurance_id = %created.id, "insurances: product created");
        Ok(created)
    }

    pub async fn get_insurance(&self, id: Uuid) -> UseCaseResult<InsuranceEntity> {
        self.insurance_repo
            .find_insurance_by_id(id)
            .await
            .map_err(|err| {
                error!(insurance_id = %id, db_error = ?err, "insurances: lookup failed");
                InsuranceError::Internal(err)
            })?
            .ok_or(InsuranceError::NotFound)
    }

    pub async fn list_insurances(
        &self,
        include_inactive: bool,
    ) -> UseCaseResult<Vec<InsuranceEntity>> {
        self.insurance_repo
            .list_insurances(include_inactive)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "insurances: listing failed");
                InsuranceError::Internal(err)
            })
    }

    pub async fn update_insurance(
        &self,
        id: Uuid,
        mut update: UpdateInsuranceEntity,
    ) -> UseCaseResult<InsuranceEntity> {
        self.get_insurance(id).await?;

        update.updated_at = Some(Utc::now());
        let updated = self
            .insurance_repo
            .update_insurance(id, update)
            .await
            .map_err(|err| {
                error!(insurance_id = %id, db_error = ?err, "insurances: update failed");
                InsuranceError::Internal(err)
            })?;
        info!(insurance_id = %id, "insurances: product updated");
        Ok(updated)
    }

    pub async fn deactivate_insurance(&self, id: Uuid) -> UseCaseResult<InsuranceEntity> {
        self.update_insurance(
            id,
            UpdateInsuranceEntity {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanolja::domain::repositories::insurances::MockInsuranceRepository;

    fn insurance(id: Uuid) -> InsuranceEntity {
        let now = Utc::now();
        InsuranceEntity {
            id,
            name: "완전자차".to_string(),
            description: None,
            daily_price: 15_000,
            coverage_limit: Some(50_000_000),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn get_missing_insurance_is_not_found() {
        let mut repo = MockInsuranceRepository::new();
        repo.expect_find_insurance_by_id().returning(|_| Ok(None));

        let use_case = InsuranceUseCase::new(Arc::new(repo));
        let err = use_case.get_insurance(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, InsuranceError::NotFound));
    }

    #[tokio::test]
    async fn deactivate_flips_is_active() {
        let id = Uuid::new_v4();
        let mut repo = MockInsuranceRepository::new();
        repo.expect_find_insurance_by_id()
            .returning(move |id| Ok(Some(insurance(id))));
        repo.expect_update_insurance()
            .withf(|_, update| update.is_active == Some(false))
            .returning(|id, _| {
                let mut row = insurance(id);
                row.is_active = false;
                Ok(row)
            });

        let use_case = InsuranceUseCase::new(Arc::new(repo));
        let updated = use_case.deactivate_insurance(id).await.unwrap();
        assert!(!updated.is_active);
    }
}
