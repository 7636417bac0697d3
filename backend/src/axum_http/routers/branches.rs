use crate::axum_http::api_response;
use crate::usecases::branches::BranchUseCase;
use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use chanolja::{
    domain::repositories::branches::BranchRepository,
    infra::supabase::{repositories::branches::BranchSupabase, rest_client::SupabaseRestClient},
};
use std::sync::Arc;

pub fn routes(supabase: Arc<SupabaseRestClient>) -> Router {
    let branches_usecase =
        BranchUseCase::new(Arc::new(BranchSupabase::new(Arc::clone(&supabase))));

    Router::new()
        .route("/", get(list_branches))
        .route("/:slug", get(resolve_branch))
        .with_state(Arc::new(branches_usecase))
}

pub async fn list_branches<B>(
    State(branches_usecase): State<Arc<BranchUseCase<B>>>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync + 'static,
{
    match branches_usecase.list_branches().await {
        Ok(branches) => api_response::ok(branches).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

/// Branch micro-site lookup. The slug can be a subdomain, a branch name,
/// or a name prefix.
pub async fn resolve_branch<B>(
    State(branches_usecase): State<Arc<BranchUseCase<B>>>,
    Path(slug): Path<String>,
) -> impl IntoResponse
where
    B: BranchRepository + Send + Sync + 'static,
{
    match branches_usecase.resolve_branch(&slug).await {
        Ok(branch) => api_response::ok(branch).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}
