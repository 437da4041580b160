use crate::config::GatewayConfig;
use crate::handlers::{health, matching};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/match", post(matching::create_match))
        .route("/health", get(health::health))
        .layer(DefaultBodyLimit::max(config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.timeout(),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
