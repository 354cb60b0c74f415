//! Strictly Gridtoe - HTTP game server

use anyhow::Result;
use clap::Parser;
use strictly_gridtoe::{Cli, Command, ServerConfig, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => {
            let mut config = ServerConfig::load(config.as_deref())?;
            if let Some(host) = host {
                config.set_host(host);
            }
            if let Some(port) = port {
                config.set_port(port);
            }

            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
                )
                .init();

            info!(
                max_ai_grid_size = config.max_ai_grid_size(),
                search_depth = config.search_depth(),
                "Starting Strictly Gridtoe server"
            );
            serve(config).await
        }
    }
}
