use sentra_api::metrics::OrderMetrics;
use sentra_api::{exporter_app, order_app, OrderState};
use sentra_core::rng::ThreadRngSource;
use sentra_order::{HttpRiskScorer, Orchestrator, SimulatedGateway};
use sentra_store::OrderStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentra_api=debug,sentra_order=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = sentra_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting order service on port {}", config.order_server.port);
    tracing::info!("Scoring orders via {}", config.scorer.url);

    let rng = Arc::new(ThreadRngSource);
    let store = Arc::new(OrderStore::new());
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(HttpRiskScorer::new(&config.scorer.url)),
        Arc::new(SimulatedGateway::new(rng)),
        store.clone(),
    ));

    let metrics = Arc::new(OrderMetrics::new().expect("Failed to build metrics registry"));
    let state = OrderState {
        orchestrator,
        store,
        metrics: metrics.clone(),
    };

    // The metrics listener runs as its own task on its own port; its
    // lifecycle is tied to process start, not to request handling.
    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.order_server.metrics_port));
    let registry = metrics.registry().clone();
    tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(metrics_addr)
            .await
            .expect("Failed to bind metrics port");
        tracing::info!("Metrics listener on {}", metrics_addr);
        axum::serve(listener, exporter_app(registry)).await.unwrap();
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.order_server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, order_app(state)).await.unwrap();
}
