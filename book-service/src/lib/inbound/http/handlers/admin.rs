use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn trigger_scraping(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<TriggerScrapingResponseData> {
    tracing::info!(triggered_by = user.username(), "Scraping run triggered");

    ApiSuccess::new(
        StatusCode::OK,
        TriggerScrapingResponseData {
            message: "Scraping process started successfully".to_string(),
            triggered_by: user.username().to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerScrapingResponseData {
    pub message: String,
    pub triggered_by: String,
}
