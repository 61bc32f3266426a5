pub mod models;
pub mod rng;
pub mod scoring;

pub use models::{Order, OrderRequest, OrderStatus, RiskAssessment, RiskReason};
pub use rng::{RandomSource, SequenceSource, ThreadRngSource};
pub use scoring::{RiskScorer, ScoreOutcome};
