use sentra_core::models::{OrderRequest, RiskAssessment, RiskReason};
use sentra_core::rng::RandomSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const FRAUD_THRESHOLD: f64 = 0.7;
pub const MODEL_VERSION: &str = "fraud-v2.1";

const HIGH_AMOUNT_CUTOFF: f64 = 5000.0;
const HIGH_AMOUNT_WEIGHT: f64 = 0.6;
const RISK_COUNTRY_WEIGHT: f64 = 0.4;
const RISKY_COUNTRIES: [&str; 4] = ["RU", "CN", "NG", "BR"];
const JITTER_MIN: f64 = -0.1;
const JITTER_MAX: f64 = 0.1;
const LATENCY_MIN_MS: f64 = 50.0;
const LATENCY_MAX_MS: f64 = 150.0;

/// Rule-based fraud scorer. Intentionally noisy (score jitter, simulated
/// processing latency) to emulate a live model; all randomness flows through
/// the injected [`RandomSource`].
#[derive(Clone)]
pub struct RiskEngine {
    rng: Arc<dyn RandomSource>,
}

impl RiskEngine {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// Full scoring pass: samples a processing delay in [50, 150] ms, waits
    /// it out, then evaluates the rules. The sampled delay is reported back
    /// as `latency_ms`.
    pub async fn assess(&self, request: &OrderRequest) -> RiskAssessment {
        let latency_ms = self.rng.next_range(LATENCY_MIN_MS, LATENCY_MAX_MS);
        tokio::time::sleep(Duration::from_millis(latency_ms as u64)).await;

        let mut assessment = self.evaluate(request);
        assessment.latency_ms = latency_ms;
        assessment
    }

    /// Rule evaluation without the simulated delay. Jitter still applies.
    pub fn evaluate(&self, request: &OrderRequest) -> RiskAssessment {
        let high_amount = request.amount > HIGH_AMOUNT_CUTOFF;
        let risky_country = RISKY_COUNTRIES.contains(&request.country.as_str());

        let mut risk_score = 0.0;
        if high_amount {
            risk_score += HIGH_AMOUNT_WEIGHT;
        }
        if risky_country {
            risk_score += RISK_COUNTRY_WEIGHT;
        }
        risk_score += self.rng.next_range(JITTER_MIN, JITTER_MAX);
        risk_score = risk_score.clamp(0.0, 1.0);

        let is_fraud = risk_score > FRAUD_THRESHOLD;

        // Reason reflects rule precedence (amount before country), not which
        // rule actually pushed the score over the threshold.
        let reason = if high_amount {
            RiskReason::HighAmount
        } else if risky_country {
            RiskReason::RiskCountry
        } else {
            RiskReason::LowRisk
        };

        debug!(
            user_id = %request.user_id,
            risk_score,
            is_fraud,
            ?reason,
            "scored order request"
        );

        RiskAssessment {
            risk_score,
            is_fraud,
            threshold: FRAUD_THRESHOLD,
            reason,
            latency_ms: 0.0,
        }
    }
}
