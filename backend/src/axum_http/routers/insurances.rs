use crate::auth::AuthUser;
use crate::axum_http::api_response;
use crate::usecases::insurances::InsuranceUseCase;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use chanolja::{
    domain::{
        entities::insurances::{NewInsuranceEntity, UpdateInsuranceEntity},
        repositories::insurances::InsuranceRepository,
    },
    infra::supabase::{
        repositories::insurances::InsuranceSupabase, rest_client::SupabaseRestClient,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct InsuranceListQuery {
    pub include_inactive: Option<bool>,
}

pub fn routes(supabase: Arc<SupabaseRestClient>) -> Router {
    let insurances_usecase =
        InsuranceUseCase::new(Arc::new(InsuranceSupabase::new(Arc::clone(&supabase))));

    Router::new()
        .route("/", get(list_insurances).post(create_insurance))
        .route(
            "/:id",
            get(get_insurance)
                .patch(update_insurance)
                .delete(delete_insurance),
        )
        .with_state(Arc::new(insurances_usecase))
}

pub async fn list_insurances<I>(
    State(insurances_usecase): State<Arc<InsuranceUseCase<I>>>,
    Query(query): Query<InsuranceListQuery>,
) -> impl IntoResponse
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    match insurances_usecase
        .list_insurances(query.include_inactive.unwrap_or(false))
        .await
    {
        Ok(insurances) => api_response::ok(insurances).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn get_insurance<I>(
    State(insurances_usecase): State<Arc<InsuranceUseCase<I>>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    match insurances_usecase.get_insurance(id).await {
        Ok(insurance) => api_response::ok(insurance).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn create_insurance<I>(
    State(insurances_usecase): State<Arc<InsuranceUseCase<I>>>,
    _auth: AuthUser,
    Json(body): Json<NewInsuranceEntity>,
) -> impl IntoResponse
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    match insurances_usecase.create_insurance(body).await {
        Ok(insurance) => api_response::ok(insurance).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn update_insurance<I>(
    State(insurances_usecase): State<Arc<InsuranceUseCase<I>>>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateInsuranceEntity>,
) -> impl IntoResponse
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    match insurances_usecase.update_insurance(id, body).await {
        Ok(insurance) => api_response::ok(insurance).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn delete_insurance<I>(
    State(insurances_usecase): State<Arc<InsuranceUseCase<I>>>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    I: InsuranceRepository + Send + Sync + 'static,
{
    match insurances_usecase.deactivate_insurance(id).await {
        Ok(insurance) => {
            api_response::ok_with_message(insurance, "보험 상품이 비활성화되었습니다").into_response()
        }
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}
