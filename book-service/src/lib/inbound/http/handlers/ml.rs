use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::books::LimitParams;
use super::ApiError;
use super::ApiSuccess;
use crate::book::errors::BookError;
use crate::book::models::BookFeatures;
use crate::book::models::Limit;
use crate::book::models::TrainingRecord;
use crate::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;
use crate::prediction::models::PredictionRequest;
use crate::prediction::models::PredictionResponse;

pub async fn book_features(
    State(state): State<AppState>,
    book_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<BookFeatures>, ApiError> {
    let Path(book_id) = book_id?;

    state
        .book_service
        .book_features(book_id)
        .map_err(ApiError::from)
        .map(|features| ApiSuccess::new(StatusCode::OK, features))
}

pub async fn training_data(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<TrainingRecord>>, ApiError> {
    let Query(params) = params?;
    let limit = Limit::training_data(params.limit).map_err(BookError::from)?;

    state
        .book_service
        .training_data(limit)
        .map_err(ApiError::from)
        .map(|records| ApiSuccess::new(StatusCode::OK, records))
}

/// Heuristic rating estimate; works without loaded book data.
pub async fn predict_rating(
    State(state): State<AppState>,
    body: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<ApiSuccess<PredictionResponse>, ApiError> {
    let Json(request) = body?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        state.predictor.predict(&request),
    ))
}
