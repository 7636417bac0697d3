use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Uniform response envelope. `data` is present on success, `error` on
/// failure; `message` carries optional human-readable context.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        message: None,
    })
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        message: Some(message.into()),
    })
}

pub fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ApiResponse::<()> {
        success: false,
        data: None,
        error: Some(message.into()),
        message: None,
    });
    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_omits_error_fields() {
        let rendered = serde_json::to_value(&ok(json!({"id": 1})).0).unwrap();
        assert_eq!(rendered, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn error_envelope_omits_data() {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some("결제 정보를 찾을 수 없습니다".to_string()),
            message: None,
        };
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(
            rendered,
            json!({"success": false, "error": "결제 정보를 찾을 수 없습니다"})
        );
    }
}
