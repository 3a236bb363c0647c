//! Runtime settings for an [`Agency`](crate::Agency).

use std::time::Duration;

use serde::Deserialize;

/// Store and notification calls give up after this long unless configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct AgencySettings {
  /// Upper bound on a single store load or save.
  pub store_timeout:  Duration,
  /// Upper bound on a single notification send.
  pub notify_timeout: Duration,
  pub admin:          AdminSeed,
}

impl AgencySettings {
  pub fn new(admin: AdminSeed) -> Self {
    Self { store_timeout: DEFAULT_TIMEOUT, notify_timeout: DEFAULT_TIMEOUT, admin }
  }
}

/// The reserved `admin` account created when the user table has none.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
  pub full_name:     String,
  pub email:         String,
  /// An argon2 PHC string, or a legacy SHA-256 hex digest.
  pub password_hash: String,
}
