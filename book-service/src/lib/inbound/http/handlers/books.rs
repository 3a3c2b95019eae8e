use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::Limit;
use crate::book::models::PriceRange;
use crate::book::models::SearchQuery;
use crate::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_books(State(state): State<AppState>) -> Result<ApiSuccess<Vec<Book>>, ApiError> {
    state
        .book_service
        .list_books()
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books))
}

pub async fn get_book(
    State(state): State<AppState>,
    book_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<Book>, ApiError> {
    let Path(book_id) = book_id?;

    state
        .book_service
        .get_book(book_id)
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::new(StatusCode::OK, book))
}

/// Raw search parameters (query string)
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub category: Option<String>,
}

pub async fn search_books(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<Book>>, ApiError> {
    let Query(params) = params?;
    let query = SearchQuery::new(params.title, params.category)?;

    state
        .book_service
        .search_books(&query)
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books))
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

pub async fn top_rated_books(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<Book>>, ApiError> {
    let Query(params) = params?;
    let limit = Limit::top_rated(params.limit).map_err(BookError::from)?;

    state
        .book_service
        .top_rated_books(limit)
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books))
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeParams {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

pub async fn price_range_books(
    State(state): State<AppState>,
    params: Result<Query<PriceRangeParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<Book>>, ApiError> {
    let Query(params) = params?;
    let range = PriceRange::new(params.min_price, params.max_price)?;

    state
        .book_service
        .books_in_price_range(range)
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<String>>, ApiError> {
    state
        .book_service
        .list_categories()
        .map_err(ApiError::from)
        .map(|categories| ApiSuccess::new(StatusCode::OK, categories))
}
