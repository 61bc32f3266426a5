use async_trait::async_trait;
use sentra_core::models::OrderRequest;
use sentra_core::rng::RandomSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const SETTLEMENT_DELAY: Duration = Duration::from_millis(100);
pub const FAILURE_PROBABILITY: f64 = 0.10;

#[derive(Debug, thiserror::Error)]
#[error("Payment declined")]
pub struct PaymentDeclined;

/// Payment processing seam. The pipeline never retries a settlement.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn settle(&self, request: &OrderRequest) -> Result<(), PaymentDeclined>;
}

/// Simulated gateway: fixed processing delay, then a decline with
/// probability 0.10. The failure draw comes from the injected source and is
/// independent of all scoring randomness.
pub struct SimulatedGateway {
    rng: Arc<dyn RandomSource>,
}

impl SimulatedGateway {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn settle(&self, request: &OrderRequest) -> Result<(), PaymentDeclined> {
        tokio::time::sleep(SETTLEMENT_DELAY).await;

        let draw = self.rng.next_unit();
        if draw < FAILURE_PROBABILITY {
            debug!(user_id = %request.user_id, draw, "simulated settlement decline");
            return Err(PaymentDeclined);
        }
        Ok(())
    }
}
