use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::config_loader;

#[derive(Debug, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String,
    pub role: String,
    pub email: Option<String>,
    pub exp: usize,
}

/// Admin identity delegated to Supabase Auth. Any valid token from the
/// project is accepted; row-level access is not re-checked here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub role: String,
}

/// Claims carried inside a branch portal token.
#[derive(Debug, Serialize, Deserialize)]
pub struct BranchClaims {
    pub branch_id: Uuid,
    pub exp: i64,
}

/// Branch manager identity for the `/api/branch` surface.
#[derive(Debug, Clone)]
pub struct BranchAuth {
    pub branch_id: Uuid,
}

#[derive(Debug)]
pub struct AuthError(anyhow::Error);

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError(err)
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::UNAUTHORIZED,
            format!("Unauthorized: {}", self.0),
        )
            .into_response()
    }
}

pub fn validate_supabase_jwt(token: &str) -> Result<SupabaseClaims, AuthError> {
    let config =
        config_loader::load().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let secret = config.supabase.jwt_secret;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.set_audience(&["authenticated", "service_role"]);

    let token_data = decode::<SupabaseClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

/// Branch tokens are base64-encoded JSON with an expiry, not signed.
/// Issued out-of-band to branch managers; rotation is manual.
pub fn encode_branch_token(branch_id: Uuid, exp: i64) -> Result<String, AuthError> {
    let claims = BranchClaims { branch_id, exp };
    let json = serde_json::to_vec(&claims).map_err(|e| anyhow::anyhow!(e))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(json))
}

pub fn decode_branch_token(token: &str) -> Result<BranchClaims, AuthError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(token.trim())
        .map_err(|e| anyhow::anyhow!("branch token is not valid base64: {}", e))?;
    let claims: BranchClaims = serde_json::from_slice(&bytes)
        .map_err(|e| anyhow::anyhow!("branch token payload is malformed: {}", e))?;

    if claims.exp <= Utc::now().timestamp() {
        return Err(AuthError(anyhow::anyhow!("branch token has expired")));
    }

    Ok(claims)
}

fn bearer_token(parts: &Parts) -> Result<&str, (StatusCode, String)> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header".to_string(),
        ))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header".to_string(),
        )
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header format".to_string(),
        ));
    }

    Ok(&auth_str[7..])
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_supabase_jwt(token)
            .map_err(|e| (StatusCode::UNAUTHORIZED, e.0.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid user ID in token".to_string(),
            )
        })?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BranchAuth
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims =
            decode_branch_token(token).map_err(|e| (StatusCode::UNAUTHORIZED, e.0.to_string()))?;

        Ok(BranchAuth {
            branch_id: claims.branch_id,
        })
    }
}
