use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::book::models::CategoryStats;
use crate::book::models::OverviewStats;
use crate::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn overview_stats(
    State(state): State<AppState>,
) -> Result<ApiSuccess<OverviewStats>, ApiError> {
    state
        .book_service
        .overview_stats()
        .map_err(ApiError::from)
        .map(|stats| ApiSuccess::new(StatusCode::OK, stats))
}

pub async fn category_stats(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<CategoryStats>>, ApiError> {
    state
        .book_service
        .category_stats()
        .map_err(ApiError::from)
        .map(|stats| ApiSuccess::new(StatusCode::OK, stats))
}
