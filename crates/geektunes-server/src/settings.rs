//! Server configuration, layered from an optional TOML file and
//! `GEEKTUNES_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use geektunes_api::ApiConfig;
use serde::Deserialize;

/// Runtime server configuration. Every field has a default, so an empty or
/// missing config file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub database_path:      PathBuf,
  pub session_ttl_hours:  i64,
  pub chat_history_limit: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               "0.0.0.0".to_string(),
      port:               5000,
      database_path:      PathBuf::from("geektunes.db"),
      session_ttl_hours:  720,
      chat_history_limit: 50,
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("GEEKTUNES"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      session_ttl:        chrono::Duration::hours(self.session_ttl_hours),
      chat_history_limit: self.chat_history_limit,
    }
  }

  /// `database_path` with a leading `~` expanded.
  pub fn database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
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
