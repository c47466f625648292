//! pulse-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! two SQLite stores, and serves the analytics API over HTTP under `/api`.
//! Every configuration key can also be supplied through the environment
//! with a `PULSE_` prefix (e.g. `PULSE_PORT=8080`).

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use pulse_store_sqlite::{EngagementDb, IdentityDb};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Runtime server configuration, deserialised from `config.toml` and the
/// `PULSE_*` environment.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  host:               String,
  port:               u16,
  engagement_db_path: PathBuf,
  identity_db_path:   PathBuf,
}

#[derive(Parser)]
#[command(author, version, about = "Pulse analytics server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PULSE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let engagement = EngagementDb::open(&server_cfg.engagement_db_path)
    .await
    .with_context(|| {
      format!(
        "failed to open engagement db at {:?}",
        server_cfg.engagement_db_path
      )
    })?;
  let identity = IdentityDb::open(&server_cfg.identity_db_path)
    .await
    .with_context(|| {
      format!(
        "failed to open identity db at {:?}",
        server_cfg.identity_db_path
      )
    })?;

  let app = Router::new()
    .nest(
      "/api",
      pulse_api::api_router(Arc::new(engagement), Arc::new(identity)),
    )
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
