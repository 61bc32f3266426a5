use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniform draws behind every stochastic decision in the pipeline
/// (score jitter, simulated latencies, the payment-failure draw). Kept as a
/// trait so tests can pin each draw to a known value.
pub trait RandomSource: Send + Sync {
    /// Next uniform draw in [0, 1).
    fn next_unit(&self) -> f64;

    /// Uniform draw in [lo, hi).
    fn next_range(&self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Replays a fixed sequence of unit draws, cycling when exhausted. Test
/// doubles across the workspace use this to make jitter, latency, and the
/// payment draw deterministic.
#[derive(Debug)]
pub struct SequenceSource {
    draws: Vec<f64>,
    cursor: AtomicUsize,
}

impl SequenceSource {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "SequenceSource needs at least one draw");
        Self {
            draws,
            cursor: AtomicUsize::new(0),
        }
    }

    /// A source that returns the same unit draw forever.
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&self) -> f64 {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.draws[idx % self.draws.len()]
    }
}
