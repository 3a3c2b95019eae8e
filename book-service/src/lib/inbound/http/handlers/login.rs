use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub const TOKEN_TYPE: &str = "bearer";

/// OAuth2 password grant. Password hashing runs on the blocking pool.
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginRequestBody>, FormRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Form(body) = form?;
    let auth_service = Arc::clone(&state.auth_service);

    let tokens =
        tokio::task::spawn_blocking(move || auth_service.login(&body.username, &body.password))
            .await
            .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))??;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: TOKEN_TYPE,
        },
    ))
}

/// Form fields of the password grant; `grant_type`, `scope` and client
/// credentials are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}
