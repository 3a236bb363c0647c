//! estate-server binary.
//!
//! Reads `estate.toml` (or the path given with `--config`), opens the SQLite
//! record store, and serves the JSON API under `/api`.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin.password_hash`:
//!
//! ```
//! cargo run -p estate-server -- --hash-password
//! ```

mod backend;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use estate_agency::{Agency, Mailer};
use estate_core::password::hash_password;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

use crate::{
  backend::Backend,
  settings::{ServerConfig, expand_tilde},
};

#[derive(Parser)]
#[command(author, version, about = "Estate CRM server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "estate.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
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

  if cli.hash_password {
    let password = read_password()?;
    println!("{}", hash_password(&password)?);
    return Ok(());
  }

  let cfg = ServerConfig::load(&cli.config)?;

  let store_path = expand_tilde(&cfg.store_path);
  let store = Backend::open(&store_path).await;
  info!(durable = store.is_durable(), "record store ready");

  let mailer = match cfg.mail.clone() {
    Some(relay) => Mailer::relay(relay).context("failed to build mail relay client")?,
    None => {
      info!("no [mail] section; notifications will only be logged");
      Mailer::log_only()
    }
  };

  let opened = Agency::open(store, mailer, cfg.agency_settings())
    .await
    .context("failed to open agency")?;
  for warning in &opened.warnings {
    warn!(?warning, "startup warning");
  }
  let agency = Arc::new(opened.value);

  let app = Router::new()
    .nest("/api", estate_api::api_router(agency))
    .layer(TraceLayer::new_for_http());

  let address = cfg.address();
  info!("Listening on http://{address}/api");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
