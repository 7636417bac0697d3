use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::reservations::{
            NewReservationEntity, ReservationEntity, UpdateReservationEntity,
        },
        repositories::reservations::ReservationRepository,
        value_objects::{
            pagination::{Page, Paginated},
            reservations::ReservationFilter,
        },
    },
    infra::supabase::rest_client::SupabaseRestClient,
};

pub struct ReservationSupabase {
    client: Arc<SupabaseRestClient>,
}

impl ReservationSupabase {
    pub fn new(client: Arc<SupabaseRestClient>) -> Self {
        Self { client }
    }
}

fn rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl ReservationRepository for ReservationSupabase {
    async fn create_reservation(
        &self,
        reservation: NewReservationEntity,
    ) -> Result<ReservationEntity> {
        self.client.insert("reservations", &reservation).await
    }

    async fn find_reservation_by_id(&self, id: Uuid) -> Result<Option<ReservationEntity>> {
        let rows: Vec<ReservationEntity> = self
            .client
            .select(
                "reservations",
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: Page,
    ) -> Result<Paginated<ReservationEntity>> {
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", page.limit().to_string()),
            ("offset", page.offset().to_string()),
        ];
        if let Some(branch_id) = filter.branch_id {
            query.push(("branch_id", format!("eq.{}", branch_id)));
        }
        if let Some(vehicle_id) = filter.vehicle_id {
            query.push(("vehicle_id", format!("eq.{}", vehicle_id)));
        }
        if let Some(status) = filter.status {
            query.push(("status", format!("eq.{}", status)));
        }
        if let Some(payment_status) = filter.payment_status {
            query.push(("payment_status", format!("eq.{}", payment_status)));
        }
        if let Some(from) = filter.from {
            query.push(("start_at", format!("gte.{}", rfc3339(from))));
        }
        if let Some(to) = filter.to {
            query.push(("end_at", format!("lte.{}", rfc3339(to))));
        }

        let (items, total) = self.client.select_with_count("reservations", &query).await?;
        Ok(Paginated {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
        })
    }

    async fn update_reservation(
        &self,
        id: Uuid,
        update: UpdateReservationEntity,
    ) -> Result<ReservationEntity> {
        self.client
            .update("reservations", &[("id", format!("eq.{}", id))], &update)
            .await
    }

    async fn find_overlapping_reservations(
        &self,
        vehicle_id: Uuid,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<Vec<ReservationEntity>> {
        // Two ranges intersect when each starts before the other ends.
        self.client
            .select(
                "reservations",
                &[
                    ("select", "*".to_string()),
                    ("vehicle_id", format!("eq.{}", vehicle_id)),
                    ("status", "neq.cancelled".to_string()),
                    ("start_at", format!("lt.{}", rfc3339(end_at))),
                    ("end_at", format!("gt.{}", rfc3339(start_at))),
                ],
            )
            .await
    }
}
