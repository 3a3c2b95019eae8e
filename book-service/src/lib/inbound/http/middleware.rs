use auth::GuardError;
use auth::Identity;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: Identity,
}

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        self.identity.as_str()
    }
}

/// Middleware that validates the bearer token and adds the caller to request
/// extensions. Rejected requests never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| GuardError::MalformedHeader))
        .transpose()?;

    let identity = state.auth_service.authorize(authorization)?;
    tracing::debug!(username = %identity, "Request authenticated");

    req.extensions_mut()
        .insert(AuthenticatedUser { identity });

    Ok(next.run(req).await)
}
