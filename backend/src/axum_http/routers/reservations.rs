use crate::auth::AuthUser;
use crate::axum_http::api_response;
use crate::usecases::reservations::ReservationUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
};
use chanolja::{
    domain::{
        repositories::{reservations::ReservationRepository, vehicles::VehicleRepository},
        value_objects::{
            enums::{
                reservation_payment_statuses::ReservationPaymentStatus,
                reservation_statuses::ReservationStatus,
            },
            pagination::PageQuery,
            reservations::{CreateReservationModel, ReservationFilter},
        },
    },
    infra::supabase::{
        repositories::{reservations::ReservationSupabase, vehicles::VehicleSupabase},
        rest_client::SupabaseRestClient,
    },
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ReservationListQuery {
    pub branch_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub status: Option<ReservationStatus>,
    pub payment_status: Option<ReservationPaymentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ReservationListQuery {
    pub fn filter(&self) -> ReservationFilter {
        ReservationFilter {
            branch_id: self.branch_id,
            vehicle_id: self.vehicle_id,
            status: self.status,
            payment_status: self.payment_status,
            from: self.from,
            to: self.to,
        }
    }

    pub fn page(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: ReservationStatus,
}

pub fn routes(supabase: Arc<SupabaseRestClient>) -> Router {
    let reservations_usecase = ReservationUseCase::new(
        Arc::new(ReservationSupabase::new(Arc::clone(&supabase))),
        Arc::new(VehicleSupabase::new(Arc::clone(&supabase))),
    );

    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/:id", get(get_reservation))
        .route("/:id/status", patch(update_status))
        .with_state(Arc::new(reservations_usecase))
}

pub async fn create_reservation<Res, Veh>(
    State(reservations_usecase): State<Arc<ReservationUseCase<Res, Veh>>>,
    Json(body): Json<CreateReservationModel>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
{
    match reservations_usecase.create_reservation(body).await {
        Ok(reservation) => {
            api_response::ok_with_message(reservation, "예약이 접수되었습니다").into_response()
        }
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn get_reservation<Res, Veh>(
    State(reservations_usecase): State<Arc<ReservationUseCase<Res, Veh>>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
{
    match reservations_usecase.get_reservation(id).await {
        Ok(reservation) => api_response::ok(reservation).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn list_reservations<Res, Veh>(
    State(reservations_usecase): State<Arc<ReservationUseCase<Res, Veh>>>,
    _auth: AuthUser,
    Query(query): Query<ReservationListQuery>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
{
    match reservations_usecase
        .list_reservations(query.filter(), query.page().normalize())
        .await
    {
        Ok(reservations) => api_response::ok(reservations).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn update_status<Res, Veh>(
    State(reservations_usecase): State<Arc<ReservationUseCase<Res, Veh>>>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
{
    match reservations_usecase.update_status(id, body.status).await {
        Ok(reservation) => api_response::ok(reservation).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}
