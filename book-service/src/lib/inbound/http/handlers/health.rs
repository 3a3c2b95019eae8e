use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

/// Reports whether book data is loaded; 503 when it is not.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let books_count = state.book_service.books_count();

    if books_count > 0 {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "data_loaded": true,
                "books_count": books_count
            })),
        )
            .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "data_loaded": false,
                "message": "Book data not found"
            })),
        )
            .into_response()
    }
}
