//! Marquee server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `MARQUEE_*` environment variables, opens the SQLite store and serves the
//! booking directory over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use marquee_api::{AppState, Settings};
use marquee_core::directory::LocationPolicy;
use marquee_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Marquee booking directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration. Every field has a default, so the file is
/// optional.
#[derive(Debug, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:            String,
  #[serde(default = "default_port")]
  port:            u16,
  #[serde(default = "default_database_path")]
  database_path:   PathBuf,
  #[serde(default = "default_recent_limit")]
  recent_limit:    usize,
  #[serde(default)]
  location_policy: LocationPolicy,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5000 }

fn default_database_path() -> PathBuf { PathBuf::from("marquee.db") }

fn default_recent_limit() -> usize { 10 }

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
    .add_source(config::Environment::with_prefix("MARQUEE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let database_path = expand_tilde(&server_cfg.database_path);

  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open store at {database_path:?}"))?;
  tracing::info!(path = ?database_path, policy = ?server_cfg.location_policy, "store opened");

  let state = AppState::new(store, Settings {
    recent_limit:    server_cfg.recent_limit,
    location_policy: server_cfg.location_policy,
  });

  let app = marquee_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
