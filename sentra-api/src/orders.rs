use crate::error::ApiError;
use crate::state::OrderState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sentra_core::models::{OrderRequest, OrderStatus};
use sentra_order::OrderError;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;

pub fn routes() -> Router<OrderState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/order", post(create_order))
        .route("/orders", get(list_orders))
        .route("/metrics", get(exposition))
}

#[derive(Debug, Serialize)]
struct CreateOrderResponse {
    order_id: String,
    status: OrderStatus,
    amount: f64,
    message: &'static str,
}

async fn home(State(state): State<OrderState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/", "200");
    Json(json!({
        "message": "Order Service",
        "endpoints": ["/health", "/order", "/orders", "/metrics"],
    }))
}

async fn health(State(state): State<OrderState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/health", "200");
    Json(json!({ "status": "healthy", "service": "order-service" }))
}

async fn exposition(State(state): State<OrderState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/metrics", "200");
    (
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        state.metrics.gather(),
    )
}

async fn list_orders(State(state): State<OrderState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/orders", "200");
    let orders = state.store.list();
    Json(json!({ "count": orders.len(), "orders": orders }))
}

/// Every terminal path lands exactly once in `orders_total{status,country}`;
/// the amount and processing-time distributions are recorded the way the
/// scorer records its own, on settled paths only.
async fn create_order(
    State(state): State<OrderState>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let Ok(Json(request)) = body else {
        state.metrics.observe_http("POST", "/order", "400");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No JSON data provided" })),
        )
            .into_response();
    };
    let country = request.country.clone();

    match state.orchestrator.create_order(&request).await {
        Ok(placed) => {
            if placed.scoring.is_unavailable() {
                state.metrics.risk_fallback_total.inc();
            }
            state
                .metrics
                .orders_total
                .with_label_values(&["completed", &country])
                .inc();
            state.metrics.order_amount.observe(placed.order.amount);
            state
                .metrics
                .processing_time
                .observe(started.elapsed().as_secs_f64());
            state.metrics.observe_http("POST", "/order", "201");

            (
                StatusCode::CREATED,
                Json(CreateOrderResponse {
                    order_id: placed.order.order_id,
                    status: placed.order.status,
                    amount: placed.order.amount,
                    message: "Order created successfully",
                }),
            )
                .into_response()
        }
        Err(err) => {
            let country_label = if matches!(err, OrderError::Store(_)) {
                "unknown"
            } else {
                country.as_str()
            };
            state
                .metrics
                .orders_total
                .with_label_values(&[err.status().as_label(), country_label])
                .inc();
            if matches!(err, OrderError::PaymentFailed) {
                state
                    .metrics
                    .processing_time
                    .observe(started.elapsed().as_secs_f64());
            }

            let api_err = ApiError::from(err);
            state
                .metrics
                .observe_http("POST", "/order", api_err.status().as_str());
            api_err.into_response()
        }
    }
}
