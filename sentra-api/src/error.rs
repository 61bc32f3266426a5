use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sentra_core::models::RiskAssessment;
use sentra_order::OrderError;
use serde_json::json;

/// Error surface of the order API. Dependency failures never appear here:
/// the orchestrator recovers them locally (fail-open) before this layer.
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    FraudDetected(RiskAssessment),
    PaymentFailed,
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::FraudDetected(_) => StatusCode::FORBIDDEN,
            ApiError::PaymentFailed => StatusCode::PAYMENT_REQUIRED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            OrderError::FraudRejected(details) => ApiError::FraudDetected(details),
            OrderError::PaymentFailed => ApiError::PaymentFailed,
            OrderError::Store(err) => ApiError::Internal(err.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::InvalidInput(msg) => json!({
                "error": format!("Invalid order data: {}", msg),
            }),
            ApiError::FraudDetected(details) => json!({
                "error": "Fraud detected",
                "details": details,
            }),
            ApiError::PaymentFailed => json!({
                "error": "Payment failed",
            }),
            ApiError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
