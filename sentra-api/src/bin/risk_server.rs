use sentra_api::metrics::RiskMetrics;
use sentra_api::{exporter_app, risk_app, RiskState};
use sentra_core::rng::ThreadRngSource;
use sentra_risk::RiskEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentra_api=debug,sentra_risk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = sentra_store::Config::load().expect("Failed to load config");
    tracing::info!(
        "Starting risk scoring service on port {}",
        config.risk_server.port
    );

    let metrics = Arc::new(RiskMetrics::new().expect("Failed to build metrics registry"));
    let state = RiskState {
        engine: RiskEngine::new(Arc::new(ThreadRngSource)),
        metrics: metrics.clone(),
    };

    // The metrics listener runs as its own task on its own port; its
    // lifecycle is tied to process start, not to request handling.
    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.risk_server.metrics_port));
    let registry = metrics.registry().clone();
    tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(metrics_addr)
            .await
            .expect("Failed to bind metrics port");
        tracing::info!("Metrics listener on {}", metrics_addr);
        axum::serve(listener, exporter_app(registry)).await.unwrap();
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.risk_server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, risk_app(state)).await.unwrap();
}
