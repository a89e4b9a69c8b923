use anyhow::{anyhow, Context, Result};
use geowatch::api::{create_router, ApiState};
use geowatch::config::{load_config_or_default, GeowatchConfig};
use geowatch::intake::LocationFeed;
use geowatch::monitor::{Monitor, Simulator};
use geowatch::Session;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geowatch=info".into()),
        )
        .init();

    info!("Geowatch starting...");

    let config = match std::env::var("GEOWATCH_CONFIG") {
        Ok(path) => {
            let config = load_config_or_default(&path)
                .map_err(|e| anyhow!("Failed to load config {}: {}", path, e))?;
            info!(path = %path, "Configuration ready");
            config
        }
        Err(_) => {
            info!("GEOWATCH_CONFIG not set, using defaults");
            GeowatchConfig::default()
        }
    };

    let admin_token = std::env::var("GEOWATCH_ADMIN_TOKEN").ok();
    if admin_token.is_none() {
        warn!("GEOWATCH_ADMIN_TOKEN not set, boundary edits are unrestricted");
    }

    // Session: boundary, registry, ledger
    let boundary = config
        .boundary
        .boundary()
        .context("Configured boundary is invalid")?;
    let session = Arc::new(Session::new(boundary));

    for entry in &config.roster {
        session.register(entry.to_entity());
    }
    info!(entities = config.roster.len(), "Roster registered");

    // Monitoring loop
    let window = config
        .monitor
        .window()
        .context("Invalid monitoring window in [monitor]")?;
    let mut monitor = Monitor::new(Arc::clone(&session), config.monitor.interval(), window);
    if config.simulation.enabled {
        let simulator = Simulator::from_config(&config.simulation)
            .context("Invalid simulation settings in [simulation]")?;
        monitor = monitor.with_simulator(simulator);
    }
    let monitor_handle = Arc::new(monitor).start();

    // HTTP API
    let projection = config
        .projection
        .build(config.simulation.plane_min, config.simulation.plane_max);
    let state = ApiState {
        session: Arc::clone(&session),
        feed: Arc::new(LocationFeed::new(Arc::clone(&session), projection)),
        admin_token,
    };
    let router = create_router(state).layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.api.bind, config.api.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    monitor_handle.cancel();
    server_handle.abort();
    info!("Geowatch stopped");

    Ok(())
}
