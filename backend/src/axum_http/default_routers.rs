use axum::{http::StatusCode, response::IntoResponse};

use crate::axum_http::api_response;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn not_found() -> impl IntoResponse {
    api_response::error(StatusCode::NOT_FOUND, "요청한 리소스를 찾을 수 없습니다")
}
