use crate::models::{OrderRequest, RiskAssessment};
use async_trait::async_trait;

/// Outcome of consulting the risk scorer. `Unavailable` is recoverable by
/// contract: the orchestrator routes it to the not-fraud path (fail-open)
/// instead of surfacing it to the caller.
#[derive(Debug, Clone)]
pub enum ScoreOutcome {
    Scored(RiskAssessment),
    Unavailable { reason: String },
}

impl ScoreOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ScoreOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ScoreOutcome::Unavailable { .. })
    }
}

/// Seam between the orchestrator and the remote scoring engine.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    /// Never fails upward: implementations fold transport, timeout, and
    /// decode errors into `ScoreOutcome::Unavailable`.
    async fn score(&self, request: &OrderRequest) -> ScoreOutcome;
}
