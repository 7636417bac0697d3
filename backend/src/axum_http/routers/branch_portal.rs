use crate::auth::BranchAuth;
use crate::axum_http::api_response;
use crate::axum_http::routers::reservations::{ReservationListQuery, UpdateStatusBody};
use crate::usecases::{branches::BranchUseCase, reservations::ReservationUseCase, vehicles::VehicleUseCase};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chanolja::{
    domain::{
        repositories::{
            branches::BranchRepository, reservations::ReservationRepository,
            vehicles::VehicleRepository,
        },
        value_objects::{pagination::PageQuery, vehicles::VehicleFilter},
    },
    infra::supabase::{
        repositories::{
            branches::BranchSupabase, reservations::ReservationSupabase,
            vehicles::VehicleSupabase,
        },
        rest_client::SupabaseRestClient,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Everything the branch portal needs behind one state value.
pub struct BranchPortalState<Res, Veh, Br>
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
{
    pub reservations: ReservationUseCase<Res, Veh>,
    pub vehicles: VehicleUseCase<Veh>,
    pub branches: BranchUseCase<Br>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PortalVehicleListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub fn routes(supabase: Arc<SupabaseRestClient>) -> Router {
    let vehicle_repo = Arc::new(VehicleSupabase::new(Arc::clone(&supabase)));
    let state = BranchPortalState {
        reservations: ReservationUseCase::new(
            Arc::new(ReservationSupabase::new(Arc::clone(&supabase))),
            Arc::clone(&vehicle_repo),
        ),
        vehicles: VehicleUseCase::new(vehicle_repo),
        branches: BranchUseCase::new(Arc::new(BranchSupabase::new(Arc::clone(&supabase)))),
    };

    Router::new()
        .route("/me", get(get_my_branch))
        .route("/reservations", get(list_branch_reservations))
        .route("/reservations/:id/status", patch(update_branch_reservation_status))
        .route("/vehicles", get(list_branch_vehicles))
        .with_state(Arc::new(state))
}

pub async fn get_my_branch<Res, Veh, Br>(
    State(state): State<Arc<BranchPortalState<Res, Veh, Br>>>,
    auth: BranchAuth,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
{
    match state.branches.get_branch(auth.branch_id).await {
        Ok(branch) => api_response::ok(branch).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn list_branch_reservations<Res, Veh, Br>(
    State(state): State<Arc<BranchPortalState<Res, Veh, Br>>>,
    auth: BranchAuth,
    Query(query): Query<ReservationListQuery>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
{
    // The token decides the branch; a branch_id in the query is ignored.
    let mut filter = query.filter();
    filter.branch_id = Some(auth.branch_id);

    match state
        .reservations
        .list_reservations(filter, query.page().normalize())
        .await
    {
        Ok(reservations) => api_response::ok(reservations).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn update_branch_reservation_status<Res, Veh, Br>(
    State(state): State<Arc<BranchPortalState<Res, Veh, Br>>>,
    auth: BranchAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
{
    // A reservation belonging to another branch looks like a missing one.
    match state.reservations.get_reservation(id).await {
        Ok(reservation) if reservation.branch_id == auth.branch_id => {}
        Ok(_) => {
            return api_response::error(StatusCode::NOT_FOUND, "예약 정보를 찾을 수 없습니다");
        }
        Err(err) => return api_response::error(err.status_code(), err.to_string()),
    }

    match state.reservations.update_status(id, body.status).await {
        Ok(reservation) => api_response::ok(reservation).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn list_branch_vehicles<Res, Veh, Br>(
    State(state): State<Arc<BranchPortalState<Res, Veh, Br>>>,
    auth: BranchAuth,
    Query(query): Query<PortalVehicleListQuery>,
) -> impl IntoResponse
where
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
{
    let filter = VehicleFilter {
        branch_id: Some(auth.branch_id),
        status: None,
        is_active: None,
    };
    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .normalize();

    match state.vehicles.list_vehicles(filter, page).await {
        Ok(vehicles) => api_response::ok(vehicles).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}
