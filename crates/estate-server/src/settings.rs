//! Server configuration: an optional TOML file overlaid with `ESTATE_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use estate_agency::{AdminSeed, AgencySettings, mailer::RelaySettings, settings::DEFAULT_TIMEOUT};
use serde::Deserialize;

/// Runtime server configuration, deserialised from `estate.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  #[serde(default = "default_timeout_secs")]
  pub store_timeout_secs: u64,
  pub admin:              AdminSeed,
  /// Without a relay, notifications are only logged.
  #[serde(default)]
  pub mail:               Option<RelaySettings>,
}

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("estate.db") }

fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT.as_secs() }

impl ServerConfig {
  /// Read `path` (if it exists) and apply environment overrides such as
  /// `ESTATE_PORT` or `ESTATE_ADMIN__EMAIL`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false));
    Self::from_builder(builder)
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    builder
      .add_source(
        config::Environment::with_prefix("ESTATE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn agency_settings(&self) -> AgencySettings {
    let mut settings = AgencySettings::new(self.admin.clone());
    settings.store_timeout = Duration::from_secs(self.store_timeout_secs);
    if let Some(mail) = &self.mail {
      settings.notify_timeout = Duration::from_secs(mail.timeout_secs);
    }
    settings
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
