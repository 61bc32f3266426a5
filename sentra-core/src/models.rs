use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound checkout request, shared by the risk scorer and the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".to_string()
}

impl OrderRequest {
    pub fn new(user_id: impl Into<String>, amount: f64, country: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            country: country.into(),
        }
    }
}

/// Which rule the scorer attributes a decision to. Precedence is fixed:
/// the amount rule is checked before the country rule, regardless of which
/// one actually drove the score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    HighAmount,
    RiskCountry,
    LowRisk,
}

/// One scoring verdict. Produced per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub is_fraud: bool,
    pub threshold: f64,
    pub reason: RiskReason,
    pub latency_ms: f64,
}

/// Terminal outcome of an order attempt. Only `Completed` is ever stored;
/// the other variants exist as response/metric labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Completed,
    Fraud,
    PaymentFailed,
    Invalid,
    Error,
}

impl OrderStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Fraud => "fraud",
            OrderStatus::PaymentFailed => "payment_failed",
            OrderStatus::Invalid => "invalid",
            OrderStatus::Error => "error",
        }
    }
}

/// A settled order. Identity is the `order_id`; records are immutable once
/// created and live for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub amount: f64,
    pub country: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build the completed record for a settled request. This is the only
    /// constructor: nothing but completed orders is ever persisted.
    pub fn completed(order_id: impl Into<String>, request: &OrderRequest) -> Self {
        Self {
            order_id: order_id.into(),
            user_id: request.user_id.clone(),
            amount: request.amount,
            country: request.country.clone(),
            status: OrderStatus::Completed,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_defaults_to_us() {
        let req: OrderRequest = serde_json::from_str(r#"{"user_id":"u1","amount":100}"#).unwrap();
        assert_eq!(req.country, "US");
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&OrderStatus::PaymentFailed).unwrap();
        assert_eq!(json, r#""payment_failed""#);
        assert_eq!(OrderStatus::PaymentFailed.as_label(), "payment_failed");
    }

    #[test]
    fn reason_serializes_as_snake_case() {
        let json = serde_json::to_string(&RiskReason::HighAmount).unwrap();
        assert_eq!(json, r#""high_amount""#);
    }
}
