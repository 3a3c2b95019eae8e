use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::login::TOKEN_TYPE;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Mint a new access token for the bearer of any valid session token.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let access_token = state
        .auth_service
        .refresh(&user.identity)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::info!(username = user.username(), "Access token refreshed");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData {
            access_token,
            token_type: TOKEN_TYPE,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
    pub token_type: &'static str,
}
