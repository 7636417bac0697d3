use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::vehicles::{NewVehicleEntity, UpdateVehicleEntity, VehicleEntity},
        repositories::vehicles::VehicleRepository,
        value_objects::{
            pagination::{Page, Paginated},
            vehicles::VehicleFilter,
        },
    },
    infra::supabase::rest_client::SupabaseRestClient,
};

pub struct VehicleSupabase {
    client: Arc<SupabaseRestClient>,
}

impl VehicleSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VehicleRepository for VehicleSupabase {
    async fn create_vehicle(&self, vehicle: NewVehicleEntity) -> Result<VehicleEntity> {
        self.client.insert("vehicles", &vehicle).await
    }

    async fn find_vehicle_by_id(&self, id: Uuid) -> Result<Option<VehicleEntity>> {
        let rows: Vec<VehicleEntity> = self
            .client
            .select(
                "vehicles",
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_vehicles(
        &self,
        filter: VehicleFilter,
        page: Page,
    ) -> Result<Paginated<VehicleEntity>> {
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", page.limit().to_string()),
            ("offset", page.offset().to_string()),
        ];
        if let Some(branch_id) = filter.branch_id {
            query.push(("branch_id", format!("eq.{}", branch_id)));
        }
        if let Some(status) = filter.status {
            query.push(("status", format!("eq.{}", status)));
        }
        // Soft-deleted rows stay hidden unless explicitly requested.
        let is_active = filter.is_active.unwrap_or(true);
        query.push(("is_active", format!("is.{}", is_active)));

        let (items, total) = self.client.select_with_count("vehicles", &query).await?;
        Ok(Paginated {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
        })
    }

    async fn update_vehicle(
        &self,
        id: Uuid,
        update: UpdateVehicleEntity,
    ) -> Result<VehicleEntity> {
        self.client
            .update("vehicles", &[("id", format!("eq.{}", id))], &update)
            .await
    }
}
