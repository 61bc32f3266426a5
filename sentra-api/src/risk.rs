use crate::state::RiskState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sentra_core::models::{OrderRequest, RiskReason};
use sentra_risk::MODEL_VERSION;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;

pub fn routes() -> Router<RiskState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/metrics", get(exposition))
}

/// Wire shape of a prediction. Scores are rounded for presentation only;
/// the engine works with the unrounded values.
#[derive(Debug, Serialize)]
struct PredictResponse {
    user_id: String,
    risk_score: f64,
    is_fraud: bool,
    threshold: f64,
    reason: RiskReason,
    model_version: &'static str,
    processing_time_ms: f64,
}

async fn home(State(state): State<RiskState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/", "200");
    Json(json!({
        "message": "Risk Scoring Service",
        "endpoints": ["/health", "/predict", "/metrics"],
    }))
}

async fn health(State(state): State<RiskState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/health", "200");
    Json(json!({ "status": "healthy", "model": MODEL_VERSION }))
}

async fn exposition(State(state): State<RiskState>) -> impl IntoResponse {
    state.metrics.observe_http("GET", "/metrics", "200");
    (
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        state.metrics.gather(),
    )
}

async fn predict(
    State(state): State<RiskState>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let Ok(Json(request)) = body else {
        state.metrics.observe_http("POST", "/predict", "400");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No JSON data provided" })),
        )
            .into_response();
    };

    let assessment = state.engine.assess(&request).await;

    let fraud_label = if assessment.is_fraud { "true" } else { "false" };
    state
        .metrics
        .predictions_total
        .with_label_values(&[fraud_label, &request.country])
        .inc();
    state.metrics.fraud_score.observe(assessment.risk_score);
    state
        .metrics
        .prediction_latency
        .observe(started.elapsed().as_secs_f64());
    state.metrics.observe_http("POST", "/predict", "200");

    let user_id = if request.user_id.is_empty() {
        "unknown".to_string()
    } else {
        request.user_id
    };

    Json(PredictResponse {
        user_id,
        risk_score: round(assessment.risk_score, 3),
        is_fraud: assessment.is_fraud,
        threshold: assessment.threshold,
        reason: assessment.reason,
        model_version: MODEL_VERSION,
        processing_time_ms: round(assessment.latency_ms, 2),
    })
    .into_response()
}

fn round(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
