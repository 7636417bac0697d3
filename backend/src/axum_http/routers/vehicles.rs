use crate::auth::AuthUser;
use crate::axum_http::api_response;
use crate::usecases::vehicles::VehicleUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use chanolja::{
    domain::{
        entities::vehicles::{NewVehicleEntity, UpdateVehicleEntity},
        repositories::vehicles::VehicleRepository,
        value_objects::{
            enums::vehicle_statuses::VehicleStatus, pagination::PageQuery,
            vehicles::VehicleFilter,
        },
    },
    infra::supabase::{repositories::vehicles::VehicleSupabase, rest_client::SupabaseRestClient},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

// Flattening filter and page into one struct trips up the query-string
// deserializer, so the parameters are spelled out.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleListQuery {
    pub branch_id: Option<Uuid>,
    pub status: Option<VehicleStatus>,
    pub is_active: Option<bool>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub fn routes(supabase: Arc<SupabaseRestClient>) -> Router {
    let vehicles_usecase =
        VehicleUseCase::new(Arc::new(VehicleSupabase::new(Arc::clone(&supabase))));

    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
        .with_state(Arc::new(vehicles_usecase))
}

pub async fn list_vehicles<V>(
    State(vehicles_usecase): State<Arc<VehicleUseCase<V>>>,
    Query(query): Query<VehicleListQuery>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    let filter = VehicleFilter {
        branch_id: query.branch_id,
        status: query.status,
        is_active: query.is_active,
    };
    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .normalize();

    match vehicles_usecase.list_vehicles(filter, page).await {
        Ok(vehicles) => api_response::ok(vehicles).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn get_vehicle<V>(
    State(vehicles_usecase): State<Arc<VehicleUseCase<V>>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicles_usecase.get_vehicle(id).await {
        Ok(vehicle) => api_response::ok(vehicle).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn create_vehicle<V>(
    State(vehicles_usecase): State<Arc<VehicleUseCase<V>>>,
    _auth: AuthUser,
    Json(body): Json<NewVehicleEntity>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicles_usecase.create_vehicle(body).await {
        Ok(vehicle) => api_response::ok(vehicle).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn update_vehicle<V>(
    State(vehicles_usecase): State<Arc<VehicleUseCase<V>>>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVehicleEntity>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicles_usecase.update_vehicle(id, body).await {
        Ok(vehicle) => api_response::ok(vehicle).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn delete_vehicle<V>(
    State(vehicles_usecase): State<Arc<VehicleUseCase<V>>>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    V: VehicleRepository + Send + Sync + 'static,
{
    match vehicles_usecase.deactivate_vehicle(id).await {
        Ok(vehicle) => api_response::ok_with_message(vehicle, "차량이 비활성화되었습니다").into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}
