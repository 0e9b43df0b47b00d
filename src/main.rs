//! dispatch-gateway - AI model gateway
//!
//! ```bash
//! # Start with config/gateway.yaml (or defaults when absent)
//! gateway
//!
//! # Explicit config and listen address
//! gateway --config /etc/gateway.yaml --port 9000
//!
//! # Verbose logging
//! RUST_LOG=debug gateway
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use dispatch_gateway::config::Config;
use dispatch_gateway::server::HttpServer;
use dispatch_gateway::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// AI model gateway with load balancing, failover and admission control
#[derive(Parser, Debug)]
#[command(name = "gateway")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "GATEWAY_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen host (overrides the config file)
    #[arg(long, env = "GATEWAY_HOST")]
    host: Option<String>,

    /// Listen port (overrides the config file)
    #[arg(short = 'p', long, env = "GATEWAY_PORT")]
    port: Option<u16>,
}

async fn load_config(path: Option<&PathBuf>) -> Result<(Config, Option<String>)> {
    match path {
        Some(path) => {
            let config = Config::from_file(path)
                .await
                .with_context(|| format!("failed to load {}", path.display()))?;
            Ok((config, None))
        }
        None if tokio::fs::try_exists(DEFAULT_CONFIG_PATH).await.unwrap_or(false) => {
            let config = Config::from_file(DEFAULT_CONFIG_PATH)
                .await
                .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_PATH))?;
            Ok((config, None))
        }
        None => Ok((
            Config::default(),
            Some(format!("{} not found, using defaults", DEFAULT_CONFIG_PATH)),
        )),
    }
}

async fn run(args: Args) -> Result<()> {
    let (config, notice) = load_config(args.config.as_ref()).await?;
    let config = config.with_server_overrides(args.host, args.port);

    init_logging(config.logging()).context("failed to initialize logging")?;
    if let Some(notice) = notice {
        warn!("{}", notice);
    }

    info!("Starting {} v{}", dispatch_gateway::NAME, dispatch_gateway::VERSION);
    info!("Load balancing: {}", config.router().strategy);

    let server = HttpServer::new(&config).await?;
    server.start().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
