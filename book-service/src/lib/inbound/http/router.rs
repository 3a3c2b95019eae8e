use std::sync::Arc;
use std::time::Duration;

use auth::AuthService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::trigger_scraping;
use super::handlers::books::get_book;
use super::handlers::books::list_books;
use super::handlers::books::list_categories;
use super::handlers::books::price_range_books;
use super::handlers::books::search_books;
use super::handlers::books::top_rated_books;
use super::handlers::health::health_check;
use super::handlers::home::homepage;
use super::handlers::login::login;
use super::handlers::ml::book_features;
use super::handlers::ml::predict_rating;
use super::handlers::ml::training_data;
use super::handlers::refresh::refresh;
use super::handlers::stats::category_stats;
use super::handlers::stats::overview_stats;
use super::middleware::authenticate as auth_middleware;
use crate::domain::book::service::BookService;
use crate::domain::prediction::service::RatingPredictor;
use crate::outbound::repositories::InMemoryBookRepository;

#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<BookService<InMemoryBookRepository>>,
    pub auth_service: Arc<AuthService>,
    pub predictor: RatingPredictor,
}

pub fn create_router(
    book_service: Arc<BookService<InMemoryBookRepository>>,
    auth_service: Arc<AuthService>,
) -> Router {
    let state = AppState {
        book_service,
        auth_service,
        predictor: RatingPredictor::new(),
    };

    let public_routes = Router::new()
        .route("/books", get(list_books))
        .route("/books/search", get(search_books))
        .route("/books/top-rated", get(top_rated_books))
        .route("/books/price-range", get(price_range_books))
        .route("/books/:book_id", get(get_book))
        .route("/categories", get(list_categories))
        .route("/stats/overview", get(overview_stats))
        .route("/stats/categories", get(category_stats))
        .route("/health", get(health_check));

    let ml_routes = Router::new()
        .route("/features/:book_id", get(book_features))
        .route("/training-data", get(training_data))
        .route("/predictions", post(predict_rating));

    let auth_routes = Router::new().route("/login", post(login)).merge(
        // Refresh tokens pass through the same bearer check as access tokens.
        Router::new()
            .route("/refresh", post(refresh))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
    );

    let admin_routes = Router::new()
        .route("/scraping/trigger", post(trigger_scraping))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(homepage))
        .nest("/api/v1/public", public_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/admin", admin_routes)
        .nest("/api/v1/ml", ml_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
