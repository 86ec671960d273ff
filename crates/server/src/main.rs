use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelsmith_core::{
    create_prompt_generator, create_publisher, create_renderer, load_config, validate_config,
    AuditLog, AutomationAgent, Discovery, PromptGenerator, Publisher, Renderer, SqliteAuditLog,
    StaticTrendingDiscovery,
};
use reelsmith_server::api::create_router;
use reelsmith_server::shutdown::cancel_on_shutdown;
use reelsmith_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("REELSMITH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).context("Failed to serialize config")?;
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        "reelsmith {} configuration loaded (hash {})",
        VERSION,
        &config_hash[..16]
    );
    info!("Database path: {:?}", config.database.path);

    // Run log
    let audit: Arc<dyn AuditLog> = Arc::new(
        SqliteAuditLog::new(&config.database.path).context("Failed to open run log")?,
    );
    info!("Run log initialized");

    // Collaborators
    let discovery: Arc<dyn Discovery> = Arc::new(StaticTrendingDiscovery::new());
    let prompts: Arc<dyn PromptGenerator> = Arc::from(
        create_prompt_generator(&config.prompt).context("Failed to create prompt generator")?,
    );
    let renderer: Arc<dyn Renderer> = Arc::from(create_renderer(&config.render));
    let publisher: Arc<dyn Publisher> = Arc::from(create_publisher(&config.publish));
    info!(
        "Using discovery '{}', prompts '{}', renderer '{}', publisher '{}'",
        discovery.name(),
        prompts.name(),
        renderer.name(),
        publisher.name()
    );

    let agent = Arc::new(AutomationAgent::new(
        config.agent.clone(),
        Arc::clone(&discovery),
        prompts,
        renderer,
        publisher,
        Arc::clone(&audit),
    ));

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::clone(&agent),
        discovery,
        audit,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(cancel_on_shutdown(agent, shutdown_signal()))
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
