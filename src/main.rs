use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use tariff_engine::api::{AppState, create_router};
use tariff_engine::config::ConfigLoader;
use tariff_engine::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "tariff-engine", version, about = "Tariff and billing engine")]
struct Args {
    /// Configuration directory
    #[arg(
        short,
        long,
        env = "TARIFF_ENGINE_CONFIG",
        default_value = "./config/isu_basic"
    )]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, env = "TARIFF_ENGINE_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!(address = %args.bind, "Tariff engine listening");

    axum::serve(listener, app).await?;

    Ok(())
}
