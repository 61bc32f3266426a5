use crate::settlement::PaymentGateway;
use chrono::Utc;
use sentra_core::models::{Order, OrderRequest, OrderStatus, RiskAssessment};
use sentra_core::scoring::{RiskScorer, ScoreOutcome};
use sentra_store::{OrderStore, StoreError};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Drives one order attempt through validate → score → settle → persist.
/// Collaborators are injected; the orchestrator owns no randomness of its
/// own and holds the only write path into the store.
pub struct Orchestrator {
    scorer: Arc<dyn RiskScorer>,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<OrderStore>,
}

/// A successfully settled order, together with the scoring outcome that
/// cleared it. Carrying the outcome keeps the fail-open path observable:
/// a caller can tell a scored clearance from a fallback one.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub scoring: ScoreOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order data: {0}")]
    InvalidInput(String),

    #[error("Fraud detected")]
    FraudRejected(RiskAssessment),

    #[error("Payment failed")]
    PaymentFailed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Terminal status label for the outcome counter.
    pub fn status(&self) -> OrderStatus {
        match self {
            OrderError::InvalidInput(_) => OrderStatus::Invalid,
            OrderError::FraudRejected(_) => OrderStatus::Fraud,
            OrderError::PaymentFailed => OrderStatus::PaymentFailed,
            OrderError::Store(_) => OrderStatus::Error,
        }
    }
}

impl Orchestrator {
    pub fn new(
        scorer: Arc<dyn RiskScorer>,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<OrderStore>,
    ) -> Self {
        Self {
            scorer,
            gateway,
            store,
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub async fn create_order(&self, request: &OrderRequest) -> Result<PlacedOrder, OrderError> {
        // Invalid input never reaches the scorer.
        validate(request)?;

        let scoring = self.scorer.score(request).await;
        match &scoring {
            ScoreOutcome::Scored(assessment) if assessment.is_fraud => {
                info!(
                    user_id = %request.user_id,
                    risk_score = assessment.risk_score,
                    "order rejected as fraud"
                );
                return Err(OrderError::FraudRejected(assessment.clone()));
            }
            ScoreOutcome::Scored(_) => {}
            ScoreOutcome::Unavailable { reason } => {
                // Fail open: an unreachable scorer clears the order.
                warn!(%reason, user_id = %request.user_id, "scorer unavailable, proceeding as not-fraud");
            }
        }

        self.gateway
            .settle(request)
            .await
            .map_err(|_| OrderError::PaymentFailed)?;

        let order = Order::completed(next_order_id(), request);
        self.store.insert(order.clone())?;

        Ok(PlacedOrder { order, scoring })
    }
}

fn validate(request: &OrderRequest) -> Result<(), OrderError> {
    if request.user_id.trim().is_empty() {
        return Err(OrderError::InvalidInput("user_id is required".into()));
    }
    if request.amount <= 0.0 {
        return Err(OrderError::InvalidInput("amount must be positive".into()));
    }
    Ok(())
}

/// Process-unique order id: unix timestamp salted with a v4 uuid.
fn next_order_id() -> String {
    format!("ord_{}_{}", Utc::now().timestamp(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::{PaymentDeclined, SimulatedGateway};
    use async_trait::async_trait;
    use sentra_core::models::RiskReason;
    use sentra_core::rng::SequenceSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticScorer {
        outcome: ScoreOutcome,
        calls: AtomicUsize,
    }

    impl StaticScorer {
        fn new(outcome: ScoreOutcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn cleared(risk_score: f64) -> Self {
            Self::new(ScoreOutcome::Scored(assessment(risk_score, false)))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RiskScorer for StaticScorer {
        async fn score(&self, _request: &OrderRequest) -> ScoreOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    struct RecordingGateway {
        calls: AtomicUsize,
        decline: bool,
    }

    impl RecordingGateway {
        fn settling() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                decline: false,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn settle(&self, _request: &OrderRequest) -> Result<(), PaymentDeclined> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.decline {
                Err(PaymentDeclined)
            } else {
                Ok(())
            }
        }
    }

    fn assessment(risk_score: f64, is_fraud: bool) -> RiskAssessment {
        RiskAssessment {
            risk_score,
            is_fraud,
            threshold: 0.7,
            reason: if is_fraud {
                RiskReason::HighAmount
            } else {
                RiskReason::LowRisk
            },
            latency_ms: 80.0,
        }
    }

    fn orchestrator(
        scorer: Arc<dyn RiskScorer>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Orchestrator {
        Orchestrator::new(scorer, gateway, Arc::new(OrderStore::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn clean_request_completes_and_persists() {
        // Settlement draw 0.9 is well above the failure probability.
        let gateway = SimulatedGateway::new(Arc::new(SequenceSource::constant(0.9)));
        let orch = orchestrator(Arc::new(StaticScorer::cleared(0.0)), Arc::new(gateway));

        let placed = orch
            .create_order(&OrderRequest::new("u1", 100.0, "US"))
            .await
            .unwrap();

        assert_eq!(placed.order.status, OrderStatus::Completed);
        assert!(placed.order.order_id.starts_with("ord_"));
        assert!(!placed.scoring.is_unavailable());
        assert_eq!(orch.store().list(), vec![placed.order.order_id.clone()]);
    }

    #[tokio::test]
    async fn confirmed_fraud_is_rejected_with_diagnostics() {
        let scorer = StaticScorer::new(ScoreOutcome::Scored(assessment(1.0, true)));
        let orch = orchestrator(Arc::new(scorer), Arc::new(RecordingGateway::settling()));

        let err = orch
            .create_order(&OrderRequest::new("u2", 6000.0, "RU"))
            .await
            .unwrap_err();

        match err {
            OrderError::FraudRejected(details) => {
                assert_eq!(details.risk_score, 1.0);
                assert_eq!(details.reason, RiskReason::HighAmount);
            }
            other => panic!("expected fraud rejection, got {other:?}"),
        }
        assert!(orch.store().is_empty());
    }

    #[tokio::test]
    async fn fraud_rejection_never_reaches_settlement() {
        let scorer = StaticScorer::new(ScoreOutcome::Scored(assessment(0.9, true)));
        let gateway = Arc::new(RecordingGateway::settling());
        let orch = orchestrator(Arc::new(scorer), gateway.clone());

        let _ = orch
            .create_order(&OrderRequest::new("u2", 6000.0, "RU"))
            .await;

        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_amount_skips_scorer_and_store() {
        let scorer = Arc::new(StaticScorer::cleared(0.0));
        let orch = orchestrator(scorer.clone(), Arc::new(RecordingGateway::settling()));

        let err = orch
            .create_order(&OrderRequest::new("u1", 0.0, "US"))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidInput(_)));
        assert_eq!(err.status(), OrderStatus::Invalid);
        assert_eq!(scorer.calls(), 0);
        assert!(orch.store().is_empty());
    }

    #[tokio::test]
    async fn empty_user_id_is_invalid() {
        let orch = orchestrator(
            Arc::new(StaticScorer::cleared(0.0)),
            Arc::new(RecordingGateway::settling()),
        );
        let err = orch
            .create_order(&OrderRequest::new("", 100.0, "US"))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn unavailable_scorer_fails_open_into_settlement() {
        let scorer = StaticScorer::new(ScoreOutcome::unavailable("connection refused"));
        let gateway = Arc::new(RecordingGateway::settling());
        let orch = orchestrator(Arc::new(scorer), gateway.clone());

        let placed = orch
            .create_order(&OrderRequest::new("u1", 100.0, "US"))
            .await
            .unwrap();

        // Settlement ran despite the scoring failure, and the fallback is
        // visible on the receipt.
        assert_eq!(gateway.calls(), 1);
        assert!(placed.scoring.is_unavailable());
        assert_eq!(orch.store().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn payment_decline_persists_nothing() {
        // Draw below 0.10 declines the settlement.
        let gateway = SimulatedGateway::new(Arc::new(SequenceSource::constant(0.05)));
        let orch = orchestrator(Arc::new(StaticScorer::cleared(0.0)), Arc::new(gateway));

        let err = orch
            .create_order(&OrderRequest::new("u3", 100.0, "US"))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::PaymentFailed));
        assert_eq!(err.status(), OrderStatus::PaymentFailed);
        assert!(orch.store().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fail_open_then_decline_surfaces_payment_failure() {
        // Scenario: scorer down and the settlement draw fails.
        let scorer = StaticScorer::new(ScoreOutcome::unavailable("timed out"));
        let gateway = SimulatedGateway::new(Arc::new(SequenceSource::constant(0.05)));
        let orch = orchestrator(Arc::new(scorer), Arc::new(gateway));

        let err = orch
            .create_order(&OrderRequest::new("u1", 100.0, "US"))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::PaymentFailed));
        assert!(orch.store().is_empty());
    }

    #[tokio::test]
    async fn concurrent_orders_get_distinct_ids() {
        let orch = Arc::new(orchestrator(
            Arc::new(StaticScorer::cleared(0.0)),
            Arc::new(RecordingGateway::settling()),
        ));

        let mut handles = Vec::new();
        for n in 0..16 {
            let orch = Arc::clone(&orch);
            handles.push(tokio::spawn(async move {
                orch.create_order(&OrderRequest::new(format!("u{n}"), 100.0, "US"))
                    .await
                    .expect("insert never conflicts under the id scheme")
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().order.order_id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(orch.store().len(), 16);
    }
}
