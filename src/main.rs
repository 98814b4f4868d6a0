use std::sync::Arc;

use heartline::appstate::store::AppStateStore;
use heartline::appstate::ws::event_routes;
use heartline::config::AppConfig;
use heartline::gate::NavigationGate;
use heartline::onboarding::flow::OnboardingFlow;
use heartline::onboarding::routes::{OnboardingRouteState, onboarding_routes};
use heartline::store::{Database, LibSqlBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    eprintln!("💜 Heartline v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   API: http://0.0.0.0:{}/api/onboarding/status",
        config.port
    );
    eprintln!("   WS:  ws://0.0.0.0:{}/ws/app-state", config.port);
    eprintln!("   Database: {}\n", config.db_path.display());

    let db: Arc<dyn Database> = Arc::new(
        LibSqlBackend::new_local(&config.db_path)
            .await
            .unwrap_or_else(|e| {
                eprintln!(
                    "Error: Failed to open database at {}: {}",
                    config.db_path.display(),
                    e
                );
                std::process::exit(1);
            }),
    );

    let store = AppStateStore::new(db);

    // Attach the gate before loading so it observes the load settling
    let mut gate = NavigationGate::new(store.clone()).await;
    tokio::spawn(async move {
        while let Some(screen) = gate.changed().await {
            tracing::info!(screen = %screen, "Root changed");
        }
    });

    store.load().await;

    let flow = OnboardingFlow::new(store.clone(), config.otp_code.clone());

    let app = onboarding_routes(OnboardingRouteState {
        flow,
        store: store.clone(),
    })
    .merge(event_routes(store));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Server started");
    axum::serve(listener, app).await?;

    Ok(())
}
