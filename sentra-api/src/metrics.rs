use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Collectors for the risk scoring service. Everything hangs off an
/// explicitly owned registry; nothing is registered globally.
pub struct RiskMetrics {
    registry: Registry,
    pub predictions_total: IntCounterVec,
    pub fraud_score: Histogram,
    pub prediction_latency: Histogram,
    pub http_requests_total: IntCounterVec,
}

impl RiskMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let predictions_total = IntCounterVec::new(
            Opts::new("fraud_predictions_total", "Total fraud predictions"),
            &["is_fraud", "country"],
        )?;
        let fraud_score = Histogram::with_opts(
            HistogramOpts::new("fraud_score", "Fraud prediction scores")
                .buckets(vec![0.0, 0.3, 0.5, 0.7, 0.9, 1.0]),
        )?;
        let prediction_latency = Histogram::with_opts(HistogramOpts::new(
            "prediction_latency_seconds",
            "Prediction latency",
        ))?;
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "endpoint", "status"],
        )?;

        registry.register(Box::new(predictions_total.clone()))?;
        registry.register(Box::new(fraud_score.clone()))?;
        registry.register(Box::new(prediction_latency.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            registry,
            predictions_total,
            fraud_score,
            prediction_latency,
            http_requests_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> String {
        encode(&self.registry)
    }

    pub fn observe_http(&self, method: &str, endpoint: &str, status: &str) {
        self.http_requests_total
            .with_label_values(&[method, endpoint, status])
            .inc();
    }
}

/// Collectors for the order service. `risk_fallback_total` makes fail-open
/// activations countable instead of silent.
pub struct OrderMetrics {
    registry: Registry,
    pub orders_total: IntCounterVec,
    pub order_amount: Histogram,
    pub processing_time: Histogram,
    pub risk_fallback_total: IntCounter,
    pub http_requests_total: IntCounterVec,
}

impl OrderMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let orders_total = IntCounterVec::new(
            Opts::new("orders_total", "Total orders processed"),
            &["status", "country"],
        )?;
        let order_amount = Histogram::with_opts(
            HistogramOpts::new("order_amount", "Order amount distribution")
                .buckets(vec![100.0, 500.0, 1000.0, 5000.0, 10000.0]),
        )?;
        let processing_time = Histogram::with_opts(HistogramOpts::new(
            "order_processing_time_seconds",
            "Order processing time",
        ))?;
        let risk_fallback_total = IntCounter::new(
            "risk_fallback_total",
            "Orders cleared via fail-open because the scorer was unavailable",
        )?;
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "endpoint", "status"],
        )?;

        registry.register(Box::new(orders_total.clone()))?;
        registry.register(Box::new(order_amount.clone()))?;
        registry.register(Box::new(processing_time.clone()))?;
        registry.register(Box::new(risk_fallback_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            registry,
            orders_total,
            order_amount,
            processing_time,
            risk_fallback_total,
            http_requests_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn gather(&self) -> String {
        encode(&self.registry)
    }

    pub fn observe_http(&self, method: &str, endpoint: &str, status: &str) {
        self.http_requests_total
            .with_label_values(&[method, endpoint, status])
            .inc();
    }
}

pub fn encode(registry: &Registry) -> String {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    let _ = encoder.encode(&registry.gather(), &mut buf);
    String::from_utf8_lossy(&buf).to_string()
}

/// Handler for the standalone metrics listener.
pub async fn serve_exposition(State(registry): State<Registry>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        encode(&registry),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_registry_gathers_after_observations() {
        let metrics = RiskMetrics::new().unwrap();
        metrics
            .predictions_total
            .with_label_values(&["false", "US"])
            .inc();
        metrics.fraud_score.observe(0.42);
        let text = metrics.gather();
        assert!(text.contains("fraud_predictions_total"));
        assert!(text.contains("fraud_score"));
    }

    #[test]
    fn order_registry_tracks_fallbacks() {
        let metrics = OrderMetrics::new().unwrap();
        metrics.risk_fallback_total.inc();
        assert!(metrics.gather().contains("risk_fallback_total 1"));
    }
}
