use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::vehicles::{NewVehicleEntity, UpdateVehicleEntity, VehicleEntity},
    value_objects::{
        pagination::{Page, Paginated},
        vehicles::VehicleFilter,
    },
};

#[automock]
#[async_trait]
pub trait VehicleRepository {
    async fn create_vehicle(&self, vehicle: NewVehicleEntity) -> Result<VehicleEntity>;

    async fn find_vehicle_by_id(&self, id: Uuid) -> Result<Option<VehicleEntity>>;

    async fn list_vehicles(
        &self,
        filter: VehicleFilter,
        page: Page,
    ) -> Result<Paginated<VehicleEntity>>;

    async fn update_vehicle(
        &self,
        id: Uuid,
        update: UpdateVehicleEntity,
    ) -> Result<VehicleEntity>;
}
