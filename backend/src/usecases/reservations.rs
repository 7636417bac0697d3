use std::sync::Arc;

use chanolja::domain::{
    entities::{
        reservations::{InsertReservationEntity, ReservationEntity, UpdateReservationEntity},
        vehicles::UpdateVehicleEntity,
    },
    repositories::{reservations::ReservationRepository, vehicles::VehicleRepository},
    value_objects::{
        enums::{
            reservation_payment_statuses::ReservationPaymentStatus,
            reservation_statuses::ReservationStatus, vehicle_statuses::VehicleStatus,
        },
        pagination::{Page, Paginated},
        reservations::{CreateReservationModel, ReservationFilter},
    },
};
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("예약 정보를 찾을 수 없습니다")]
    NotFound,
    #[error("차량 정보를 찾을 수 없습니다")]
    VehicleNotFound,
    #[error("유효하지 않은 예약 기간입니다")]
    InvalidPeriod,
    #[error("해당 기간에 이미 예약이 존재합니다")]
    PeriodTaken,
    #[error("변경할 수 없는 예약 상태입니다")]
    InvalidTransition,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ReservationError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ReservationError::NotFound | ReservationError::VehicleNotFound => {
                StatusCode::NOT_FOUND
            }
            ReservationError::InvalidPeriod | ReservationError::InvalidTransition => {
                StatusCode::BAD_REQUEST
            }
            ReservationError::PeriodTaken => StatusCode::CONFLICT,
            ReservationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ReservationError>;

pub struct ReservationUseCase<Res, Veh>
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
{
    reservation_repo: Arc<Res>,
    vehicle_repo: Arc<Veh>,
}

impl<Res, Veh> ReservationUseCase<Res, Veh>
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
{
    pub fn new(reservation_repo: Arc<Res>, vehicle_repo: Arc<Veh>) -> Self {
        Self {
            reservation_repo,
            vehicle_repo,
        }
    }

    /// Books a vehicle for a period. The availability check and the insert
    /// are two round trips, so concurrent bookings of the same window can
    /// still race; the winner is whoever inserts last.
    pub async fn create_reservation(
        &self,
        booking: CreateReservationModel,
    ) -> UseCaseResult<ReservationEntity> {
        info!(
            vehicle_id = %booking.vehicle_id,
            start_at = %booking.start_at,
            end_at = %booking.end_at,
            "reservations: booking requested"
        );

        if booking.end_at <= booking.start_at {
            let err = ReservationError::InvalidPeriod;
            warn!(
                start_at = %booking.start_at,
                end_at = %booking.end_at,
                status = err.status_code().as_u16(),
                "reservations: end does not come after start"
            );
            return Err(err);
        }

        let vehicle = self
            .vehicle_repo
            .find_vehicle_by_id(booking.vehicle_id)
            .await
            .map_err(|err| {
                error!(
                    vehicle_id = %booking.vehicle_id,
                    db_error = ?err,
                    "reservations: failed to load vehicle"
                );
                ReservationError::Internal(err)
            })?
            .filter(|v| v.is_active)
            .ok_or_else(|| {
                let err = ReservationError::VehicleNotFound;
                warn!(
                    vehicle_id = %booking.vehicle_id,
                    status = err.status_code().as_u16(),
                    "reservations: vehicle missing or inactive"
                );
                err
            })?;

        let overlapping = self
            .reservation_repo
            .find_overlapping_reservations(vehicle.id, booking.start_at, booking.end_at)
            .await
            .map_err(|err| {
                error!(
                    vehicle_id = %vehicle.id,
                    db_error = ?err,
                    "reservations: overlap check failed"
                );
                ReservationError::Internal(err)
            })?;

        if !overlapping.is_empty() {
            let err = ReservationError::PeriodTaken;
            warn!(
                vehicle_id = %vehicle.id,
                conflicts = overlapping.len(),
                status = err.status_code().as_u16(),
                "reservations: period already booked"
            );
            return Err(err);
        }

        let insurance_price = booking.insurance_price.unwrap_or(0);
        let reservation = self
            .reservation_repo
            .create_reservation(InsertReservationEntity {
                branch_id: booking.branch_id,
                vehicle_id: booking.vehicle_id,
                customer_name: booking.customer_name,
                customer_phone: booking.customer_phone,
                customer_email: booking.customer_email,
                start_at: booking.start_at,
                end_at: booking.end_at,
                pickup_location: booking.pickup_location,
                return_location: booking.return_location,
                rental_price: booking.rental_price,
                insurance_id: booking.insurance_id,
                insurance_price,
                total_price: booking.rental_price + insurance_price,
                status: ReservationStatus::Pending,
                payment_status: ReservationPaymentStatus::Unpaid,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "reservations: insert failed");
                ReservationError::Internal(err)
            })?;

        info!(
            reservation_id = %reservation.id,
            total_price = reservation.total_price,
            "reservations: booking created"
        );
        Ok(reservation)
    }

    pub async fn get_reservation(&self, id: Uuid) -> UseCaseResult<ReservationEntity> {
        self.reservation_repo
            .find_reservation_by_id(id)
            .await
            .map_err(|err| {
                error!(reservation_id = %id, db_error = ?err, "reservations: lookup failed");
                ReservationError::Internal(err)
            })?
            .ok_or(ReservationError::NotFound)
    }

    pub async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: Page,
    ) -> UseCaseResult<Paginated<ReservationEntity>> {
        self.reservation_repo
            .list_reservations(filter, page)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "reservations: listing failed");
                ReservationError::Internal(err)
            })
    }

    /// Moves the reservation along its lifecycle and projects the change
    /// onto the vehicle: in_use rents it, completed or cancelled frees it.
    pub async fn update_status(
        &self,
        id: Uuid,
        next: ReservationStatus,
    ) -> UseCaseResult<ReservationEntity> {
        let reservation = self.get_reservation(id).await?;

        if !reservation.status.can_transition_to(next) {
            let err = ReservationError::InvalidTransition;
            warn!(
                reservation_id = %id,
                from = %reservation.status,
                to = %next,
                status = err.status_code().as_u16(),
                "reservations: transition rejected"
            );
            return Err(err);
        }

        let updated = self
            .reservation_repo
            .update_reservation(
                id,
                UpdateReservationEntity {
                    status: Some(next),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|err| {
                error!(reservation_id = %id, db_error = ?err, "reservations: update failed");
                ReservationError::Internal(err)
            })?;

        let vehicle_status = match next {
            ReservationStatus::InUse => Some(VehicleStatus::Rented),
            ReservationStatus::Completed | ReservationStatus::Cancelled => {
                Some(VehicleStatus::Available)
            }
            _ => None,
        };

        if let Some(vehicle_status) = vehicle_status {
            self.vehicle_repo
                .update_vehicle(
                    reservation.vehicle_id,
                    UpdateVehicleEntity {
                        status: Some(vehicle_status),
                        updated_at: Some(Utc::now()),
                        ..Default::default()
                    },
                )
                .await
                .map_err(|err| {
                    error!(
                        reservation_id = %id,
                        vehicle_id = %reservation.vehicle_id,
                        db_error = ?err,
                        "reservations: vehicle projection failed"
                    );
                    ReservationError::Internal(err)
                })?;
        }

        info!(reservation_id = %id, from = %reservation.status, to = %next, "reservations: status updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanolja::domain::repositories::{
        reservations::MockReservationRepository, vehicles::MockVehicleRepository,
    };
    use chanolja::domain::entities::vehicles::VehicleEntity;
    use chrono::Duration;

    fn booking(start_offset_days: i64, end_offset_days: i64) -> CreateReservationModel {
        let now = Utc::now();
        CreateReservationModel {
            branch_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            customer_name: "이서연".to_string(),
            customer_phone: "010-9876-5432".to_string(),
            customer_email: None,
            start_at: now + Duration::days(start_offset_days),
            end_at: now + Duration::days(end_offset_days),
            pickup_location: None,
            return_location: None,
            rental_price: 80_000,
            insurance_id: None,
            insurance_price: Some(20_000),
        }
    }

    fn vehicle(id: Uuid, is_active: bool) -> VehicleEntity {
        let now = Utc::now();
        VehicleEntity {
            id,
            branch_id: Uuid::new_v4(),
            name: "쏘나타".to_string(),
            model: "Sonata".to_string(),
            year: 2023,
            plate_number: "34나5678".to_string(),
            fuel_type: None,
            seats: Some(5),
            daily_price: 40_000,
            image_url: None,
            status: VehicleStatus::Available,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn reservation(id: Uuid, status: ReservationStatus) -> ReservationEntity {
        let now = Utc::now();
        ReservationEntity {
            id,
            branch_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            customer_name: "이서연".to_string(),
            customer_phone: "010-9876-5432".to_string(),
            customer_email: None,
            start_at: now,
            end_at: now + Duration::days(1),
            pickup_location: None,
            return_location: None,
            rental_price: 80_000,
            insurance_id: None,
            insurance_price: 20_000,
            total_price: 100_000,
            status,
            payment_status: ReservationPaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_sums_rental_and_insurance_price() {
        let model = booking(1, 3);
        let vehicle_id = model.vehicle_id;

        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_vehicle_by_id()
            .returning(move |id| Ok(Some(vehicle(id, true))));

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_overlapping_reservations()
            .returning(|_, _, _| Ok(vec![]));
        reservations
            .expect_create_reservation()
            .withf(|insert| {
                insert.total_price == 100_000
                    && insert.status == ReservationStatus::Pending
                    && insert.payment_status == ReservationPaymentStatus::Unpaid
            })
            .returning(move |insert| {
                let mut created = reservation(Uuid::new_v4(), insert.status);
                created.vehicle_id = insert.vehicle_id;
                created.total_price = insert.total_price;
                Ok(created)
            });

        let use_case = ReservationUseCase::new(Arc::new(reservations), Arc::new(vehicles));
        let created = use_case.create_reservation(model).await.unwrap();
        assert_eq!(created.vehicle_id, vehicle_id);
        assert_eq!(created.total_price, 100_000);
    }

    #[tokio::test]
    async fn create_rejects_inverted_period() {
        let use_case = ReservationUseCase::new(
            Arc::new(MockReservationRepository::new()),
            Arc::new(MockVehicleRepository::new()),
        );

        let err = use_case.create_reservation(booking(3, 1)).await.unwrap_err();
        assert!(matches!(err, ReservationError::InvalidPeriod));
        assert_eq!(err.to_string(), "유효하지 않은 예약 기간입니다");
    }

    #[tokio::test]
    async fn create_rejects_overlapping_period() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_vehicle_by_id()
            .returning(move |id| Ok(Some(vehicle(id, true))));

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_overlapping_reservations()
            .returning(|vehicle_id, _, _| {
                let mut existing = reservation(Uuid::new_v4(), ReservationStatus::Confirmed);
                existing.vehicle_id = vehicle_id;
                Ok(vec![existing])
            });

        let use_case = ReservationUseCase::new(Arc::new(reservations), Arc::new(vehicles));
        let err = use_case.create_reservation(booking(1, 3)).await.unwrap_err();
        assert!(matches!(err, ReservationError::PeriodTaken));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn create_rejects_inactive_vehicle() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_vehicle_by_id()
            .returning(move |id| Ok(Some(vehicle(id, false))));

        let use_case = ReservationUseCase::new(
            Arc::new(MockReservationRepository::new()),
            Arc::new(vehicles),
        );
        let err = use_case.create_reservation(booking(1, 3)).await.unwrap_err();
        assert!(matches!(err, ReservationError::VehicleNotFound));
    }

    #[tokio::test]
    async fn in_use_transition_rents_the_vehicle() {
        let existing = reservation(Uuid::new_v4(), ReservationStatus::Confirmed);
        let id = existing.id;
        let vehicle_id = existing.vehicle_id;

        let mut reservations = MockReservationRepository::new();
        let lookup = existing.clone();
        reservations
            .expect_find_reservation_by_id()
            .returning(move |_| Ok(Some(lookup.clone())));
        reservations
            .expect_update_reservation()
            .withf(|_, update| update.status == Some(ReservationStatus::InUse))
            .returning(move |_, _| Ok(existing.clone()));

        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_update_vehicle()
            .withf(move |id, update| {
                *id == vehicle_id && update.status == Some(VehicleStatus::Rented)
            })
            .returning(move |id, _| Ok(vehicle(id, true)));

        let use_case = ReservationUseCase::new(Arc::new(reservations), Arc::new(vehicles));
        use_case
            .update_status(id, ReservationStatus::InUse)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn completed_reservation_cannot_be_cancelled() {
        let existing = reservation(Uuid::new_v4(), ReservationStatus::Completed);
        let id = existing.id;

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_reservation_by_id()
            .returning(move |_| Ok(Some(existing.clone())));

        let use_case = ReservationUseCase::new(
            Arc::new(reservations),
            Arc::new(MockVehicleRepository::new()),
        );
        let err = use_case
            .update_status(id, ReservationStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::InvalidTransition));
    }
}
