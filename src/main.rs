mod admin;
mod config;
mod logs;
mod player;
mod protocol;
mod server;
mod store;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use admin::AdminPortal;
use config::Config;
use server::Server;

/// In-memory player store served over HTTP
#[derive(Debug, Parser)]
#[command(name = "playerdb", version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("failed to load configuration")?;

    // Keeps the file writer flushing until main returns
    let _log_guard = logs::setup_logging(&config.log);

    info!("Starting playerdb - in-memory player store");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let admin = AdminPortal::new(config.admin_password()?);
    let server = Server::bind(&config.server_addr, admin)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!("Server listening on: {}", server.local_addr());

    // Start server (blocking)
    server.run().await?;

    Ok(())
}
