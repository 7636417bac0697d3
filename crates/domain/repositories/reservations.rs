use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::reservations::{NewReservationEntity, ReservationEntity, UpdateReservationEntity},
    value_objects::{
        pagination::{Page, Paginated},
        reservations::ReservationFilter,
    },
};

#[automock]
#[async_trait]
pub trait ReservationRepository {
    async fn create_reservation(
        &self,
        reservation: NewReservationEntity,
    ) -> Result<ReservationEntity>;

    async fn find_reservation_by_id(&self, id: Uuid) -> Result<Option<ReservationEntity>>;

    async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: Page,
    ) -> Result<Paginated<ReservationEntity>>;

    async fn update_reservation(
        &self,
        id: Uuid,
        update: UpdateReservationEntity,
    ) -> Result<ReservationEntity>;

    /// Non-cancelled reservations on the vehicle whose range intersects
    /// `[start_at, end_at)`.
    async fn find_overlapping_reservations(
        &self,
        vehicle_id: Uuid,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<Vec<ReservationEntity>>;
}
