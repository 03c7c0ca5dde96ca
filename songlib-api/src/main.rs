//! songlib-api - song library REST service
//!
//! Configuration comes from command-line flags, then environment variables
//! (a `.env` file is loaded first), then an optional TOML file, then
//! built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use songlib_common::config::{ConfigOverrides, ServiceConfig, TomlConfig};
use songlib_common::db::init_database;
use songlib_api::services::SongInfoClient;
use songlib_api::{build_router, AppState};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "songlib-api")]
#[command(about = "Song library REST service")]
#[command(version)]
struct Args {
    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Base URL of the song info lookup service
    #[arg(long)]
    api_base_url: Option<String>,

    /// Lookup request timeout in seconds
    #[arg(long)]
    lookup_timeout_secs: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            service_address: self.bind.clone(),
            database_url: self.database_url.clone(),
            api_base_url: self.api_base_url.clone(),
            lookup_timeout_secs: self.lookup_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is normal; variables may come from the real environment
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "songlib_api=debug,songlib_common=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting songlib-api v{}", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    let env = ConfigOverrides::from_env().context("Invalid environment configuration")?;
    let file = TomlConfig::load_optional(args.config.as_deref())
        .context("Failed to load config file")?;
    let config = ServiceConfig::resolve(args.overrides(), &env, &file)
        .context("Invalid configuration")?;

    info!("Database: {}", config.database_url);
    let pool = init_database(&config.database_url)
        .await
        .context("Failed to initialize database")?;

    let lookup = SongInfoClient::new(config.api_base_url.clone(), config.lookup_timeout)
        .context("Failed to create song info client")?;
    info!(
        "Song info service: {} (timeout {:?})",
        lookup.base_url(),
        config.lookup_timeout
    );

    let app = build_router(AppState::new(pool.clone(), lookup));

    let listener = tokio::net::TcpListener::bind(&config.service_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.service_address))?;
    info!("songlib-api listening on http://{}", config.service_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
