use std::sync::Arc;

use chanolja::domain::{
    entities::vehicles::{NewVehicleEntity, UpdateVehicleEntity, VehicleEntity},
    repositories::vehicles::VehicleRepository,
    value_objects::{
        pagination::{Page, Paginated},
        vehicles::VehicleFilter,
    },
};
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("차량 정보를 찾을 수 없습니다")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl VehicleError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            VehicleError::NotFound => StatusCode::NOT_FOUND,
            VehicleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, VehicleError>;

pub struct VehicleUseCase<V>
where
    V: VehicleRepository + Send + Sync + 'static,
{
    vehicle_repo: Arc<V>,
}

impl<V> VehicleUseCase<V>
where
    V: VehicleRepository + Send + Sync + 'static,
{
    pub fn new(vehicle_repo: Arc<V>) -> Self {
        Self { vehicle_repo }
    }

    pub async fn create_vehicle(&self, vehicle: NewVehicleEntity) -> UseCaseResult<VehicleEntity> {
        let created = self.vehicle_repo.create_vehicle(vehicle).await.map_err(|err| {
            error!(db_error = ?err, "vehicles: insert failed");
            VehicleError::Internal(err)
        })?;
        info!(vehicle_id = %created.id, "vehicles: vehicle created");
        Ok(created)
    }

    pub async fn get_vehicle(&self, id: Uuid) -> UseCaseResult<VehicleEntity> {
        self.vehicle_repo
            .find_vehicle_by_id(id)
            .await
            .map_err(|err| {
                error!(vehicle_id = %id, db_error = ?err, "vehicles: lookup failed");
                VehicleError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = VehicleError::NotFound;
                warn!(
                    vehicle_id = %id,
                    status = err.status_code().as_u16(),
                    "vehicles: vehicle not found"
                );
                err
            })
    }

    pub async fn list_vehicles(
        &self,
        filter: VehicleFilter,
        page: Page,
    ) -> UseCaseResult<Paginated<VehicleEntity>> {
        self.vehicle_repo
            .list_vehicles(filter, page)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "vehicles: listing failed");
                VehicleError::Internal(err)
            })
    }

    pub async fn update_vehicle(
        &self,
        id: Uuid,
        mut update: UpdateVehicleEntity,
    ) -> UseCaseResult<VehicleEntity> {
        // Guarantees a 404 instead of a bare "matched no rows" error.
        self.get_vehicle(id).await?;

        update.updated_at = Some(Utc::now());
        let updated = self
            .vehicle_repo
            .update_vehicle(id, update)
            .await
            .map_err(|err| {
                error!(vehicle_id = %id, db_error = ?err, "vehicles: update failed");
                VehicleError::Internal(err)
            })?;
        info!(vehicle_id = %id, "vehicles: vehicle updated");
        Ok(updated)
    }

    /// Soft delete. The row stays for reservation history.
    pub async fn deactivate_vehicle(&self, id: Uuid) -> UseCaseResult<VehicleEntity> {
        self.update_vehicle(
            id,
            UpdateVehicleEntity {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}
