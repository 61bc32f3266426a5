use axum::{http::Method, routing::get, Router};
use prometheus::Registry;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod metrics;
pub mod orders;
pub mod risk;
pub mod state;

pub use state::{OrderState, RiskState};

/// Router for the risk scoring service.
pub fn risk_app(state: RiskState) -> Router {
    risk::routes()
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router for the order service.
pub fn order_app(state: OrderState) -> Router {
    orders::routes()
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Standalone metrics listener: serves only the exposition endpoint from a
/// registry snapshot. Runs as its own task with its own lifecycle, decoupled
/// from request handling.
pub fn exporter_app(registry: Registry) -> Router {
    Router::new()
        .route("/metrics", get(metrics::serve_exposition))
        .with_state(registry)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
