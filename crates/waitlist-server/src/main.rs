//! waitlist-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), prepares a
//! SQLite store that connects on first request, and serves the waitlist API
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use waitlist_server::{expand_tilde, load_config, router};
use waitlist_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Waitlist signup server")]
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
  let server_cfg = load_config(&cli.config)?;

  let store_path = expand_tilde(&server_cfg.store_path);
  tracing::info!(?store_path, "using waitlist store");

  // The connection is established lazily on the first request.
  let store =
    SqliteStore::new(&store_path).with_connect_timeout(server_cfg.connect_timeout());

  let app = router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
