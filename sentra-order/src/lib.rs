pub mod client;
pub mod orchestrator;
pub mod settlement;

pub use client::HttpRiskScorer;
pub use orchestrator::{OrderError, Orchestrator, PlacedOrder};
pub use settlement::{PaymentGateway, SimulatedGateway};
