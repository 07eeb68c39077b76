//! Trade History Gateway
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌───────────┐
//! │  Client  │───▶│ Gateway  │───▶│  Cache   │───▶│ MetaStats │
//! │ (GET /)  │    │  (axum)  │    │  (TTL)   │    │  (REST)   │
//! └──────────┘    └──────────┘    └──────────┘    └───────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use trade_history_gateway::config::{AppConfig, Credentials};
use trade_history_gateway::gateway;
use trade_history_gateway::gateway::handlers::health::BUILD;
use trade_history_gateway::gateway::state::AppState;
use trade_history_gateway::logging::init_logging;

#[derive(Debug, Parser)]
#[command(version, about = "Caching gateway for MetaStats trade history")]
struct Cli {
    /// Environment name, selects config/{env}.yaml
    #[arg(short, long, default_value = "dev")]
    env: String,

    /// Explicit config file, overrides --env
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen port override
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load(&cli.env)?,
    };
    if let Some(port) = cli.port {
        app_config.gateway.port = port;
    }

    let _log_guard = init_logging(&app_config);
    tracing::info!(
        "Starting trade history gateway in {} mode (build {})",
        cli.env,
        BUILD
    );

    let credentials = Credentials::from_env()?;
    tracing::info!(
        "Serving account {} (cache ttl {}s)",
        credentials.account_id,
        app_config.cache.ttl_secs
    );

    let state = AppState::from_config(&app_config, credentials)?;
    gateway::run_server(&app_config, Arc::new(state)).await
}
