pub mod engine;

pub use engine::{RiskEngine, FRAUD_THRESHOLD, MODEL_VERSION};
