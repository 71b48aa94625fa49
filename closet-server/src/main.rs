//! closet-server - wardrobe tracking HTTP service
//!
//! Keeps each user's clothing items by category, tracks clean/dirty state,
//! stores outfits and picks a random outfit that is entirely clean.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use closet_common::config::{resolve_root_folder, TomlConfig};
use closet_common::db::{init_database, load_setting_i64, DEFAULT_SESSION_TIMEOUT_SECONDS};
use closet_server::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "closet-server")]
#[command(about = "Wardrobe tracking service", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "CLOSET_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the database (overrides CLOSET_ROOT_FOLDER and the config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Listen address (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// HTTP server port (overrides the config file)
    #[arg(short, long, env = "CLOSET_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise start at info and switch to the configured
    // level once the config file has been read
    let rust_log = std::env::var_os("RUST_LOG").is_some();
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting closet-server v{} [{}] built {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET")
    );

    let config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load config file")?;

    if !rust_log {
        filter_handle
            .reload(EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let db_path = config.database_path(&root_folder);
    info!("Root folder: {}", root_folder.display());
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let session_ttl = load_setting_i64(
        &pool,
        "session_timeout_seconds",
        DEFAULT_SESSION_TIMEOUT_SECONDS,
    )
    .await?;
    let session_ttl = if session_ttl > 0 {
        session_ttl
    } else {
        warn!(
            "session_timeout_seconds must be positive (got {}), using {}",
            session_ttl, DEFAULT_SESSION_TIMEOUT_SECONDS
        );
        DEFAULT_SESSION_TIMEOUT_SECONDS
    };
    info!("Session timeout: {}s", session_ttl);

    let state = AppState::new(pool.clone(), session_ttl);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("closet-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("closet-server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
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
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
