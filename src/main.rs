use tokio::sync::watch;

use ideagauge_server::config::Config;
use ideagauge_server::{logging, server};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    tracing::info!("Starting ideagauge-server v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Configuration error: {err}");
            std::process::exit(1);
        }
    };
    if config.mock_mode {
        tracing::info!(
            path = %config.mock_path.display(),
            "Mock mode enabled: search provider replaced by fixture"
        );
    }

    let state = server::AppState::from_config(&config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received ctrl-c, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    if let Err(err) = server::serve(config.bind_addr, state, shutdown_rx).await {
        tracing::error!("Server error: {err}");
        std::process::exit(1);
    }
}
