use crate::metrics::{OrderMetrics, RiskMetrics};
use sentra_order::Orchestrator;
use sentra_risk::RiskEngine;
use sentra_store::OrderStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct RiskState {
    pub engine: RiskEngine,
    pub metrics: Arc<RiskMetrics>,
}

#[derive(Clone)]
pub struct OrderState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<OrderStore>,
    pub metrics: Arc<OrderMetrics>,
}
