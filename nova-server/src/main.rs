//! # NOVA Server
//!
//! Binary entry point: parses the CLI, loads layered configuration, wires
//! the upstream clients and serves the HTTP API until Ctrl-C.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use nova_config::{Config, ConfigLoad, ConfigLoader, ConfigWarnings};
use nova_server::infra::{app::create_app, startup::wire_app_state};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "nova-server")]
#[command(about = "Media aggregation backend for metadata, anime and live sports")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment file to load instead of `./.env`
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server host (overrides config and environment)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides config and environment)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the configuration, report warnings and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_runtime_config(&cli.serve)?;

    if let Some(Command::CheckConfig) = cli.command {
        info!(
            host = %config.server.host,
            port = config.server.port,
            dev_mode = config.dev_mode,
            token_mode = %config.auth.token_mode,
            "configuration is valid"
        );
        return Ok(());
    }

    run_server(Arc::new(config)).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path.clone());
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    match &config.metadata.config_path {
        Some(path) => info!(path = %path.display(), "configuration file loaded"),
        None => info!("no configuration file found; using environment and defaults"),
    }
    log_warnings(&warnings);

    Ok(config)
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }
}

async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    let state = wire_app_state(Arc::clone(&config)).await?;
    let router = create_app(state);

    let host = config.server.host.as_str();
    let port = config.server.port;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    let addr = listener
        .local_addr()
        .context("failed to read bound address")?;

    info!("Starting NOVA Backend on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("NOVA Backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("shutdown signal received");
}
