//! GeekTunes server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! catalog, and serves the JSON API under `/api` plus the `/ws` channel.
//!
//! # Bootstrapping an admin
//!
//! Register an account through the API, then:
//!
//! ```
//! cargo run -p geektunes-server -- --promote-admin <USERNAME>
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use geektunes_api::AppState;
use geektunes_core::store::CatalogStore;
use geektunes_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "GeekTunes catalog server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Grant admin rights to an existing user and exit.
  #[arg(long, value_name = "USERNAME")]
  promote_admin: Option<String>,
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
  let server_cfg = ServerConfig::load(&cli.config)?;

  let db_path = server_cfg.database_path();
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  if let Some(username) = cli.promote_admin {
    return promote_admin(&store, &username).await;
  }

  let state = AppState::new(store, server_cfg.api_config());
  let app = geektunes_api::router(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn promote_admin(store: &SqliteStore, username: &str) -> anyhow::Result<()> {
  let user = store
    .get_user_by_username(username)
    .await?
    .with_context(|| format!("no user named {username:?}"))?;
  store.set_admin(&user.id, true).await?;
  tracing::info!(user = %user.username, "promoted to admin");
  println!("{} is now an admin", user.username);
  Ok(())
}
