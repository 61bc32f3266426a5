use async_trait::async_trait;
use reqwest::Client;
use sentra_core::models::{OrderRequest, RiskAssessment, RiskReason};
use sentra_core::scoring::{RiskScorer, ScoreOutcome};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

pub const SCORER_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP client for the risk scoring service's `POST /predict`.
///
/// Every failure mode — timeout, refused connection, non-2xx status,
/// malformed payload — is folded into `ScoreOutcome::Unavailable`; nothing
/// propagates upward and nothing is retried. The reason string only
/// distinguishes them for logging.
pub struct HttpRiskScorer {
    client: Client,
    predict_url: String,
}

impl HttpRiskScorer {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(SCORER_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!(?err, "scorer client build failed; using default client");
                Client::new()
            });
        Self {
            client,
            predict_url: format!("{}/predict", base_url.trim_end_matches('/')),
        }
    }
}

/// Wire shape of the scorer's prediction response. Fields the orchestrator
/// does not consume (`user_id`, `model_version`) are ignored on decode.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    risk_score: f64,
    is_fraud: bool,
    threshold: f64,
    reason: RiskReason,
    processing_time_ms: f64,
}

impl From<PredictResponse> for RiskAssessment {
    fn from(body: PredictResponse) -> Self {
        RiskAssessment {
            risk_score: body.risk_score,
            is_fraud: body.is_fraud,
            threshold: body.threshold,
            reason: body.reason,
            latency_ms: body.processing_time_ms,
        }
    }
}

#[async_trait]
impl RiskScorer for HttpRiskScorer {
    async fn score(&self, request: &OrderRequest) -> ScoreOutcome {
        let response = match self
            .client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                return ScoreOutcome::unavailable("scorer call timed out");
            }
            Err(err) => {
                return ScoreOutcome::unavailable(format!("scorer unreachable: {err}"));
            }
        };

        if !response.status().is_success() {
            return ScoreOutcome::unavailable(format!("scorer returned {}", response.status()));
        }

        match response.json::<PredictResponse>().await {
            Ok(body) => ScoreOutcome::Scored(body.into()),
            Err(err) => ScoreOutcome::unavailable(format!("malformed scorer response: {err}")),
        }
    }
}
