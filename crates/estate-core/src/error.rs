//! Error types for `estate-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing or out of range. Nothing was written.
  #[error("validation failed: {0}")]
  Validation(String),

  /// Rejected input to the commission calculator.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Unknown user, wrong password and disabled account all look the same.
  #[error("invalid username or password")]
  Auth,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: String },

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("record store unavailable: {0}")]
  StoreUnavailable(String),

  #[error("notification failed: {0}")]
  Notification(String),

  #[error("password hashing error: {0}")]
  PasswordHash(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
    Self::NotFound { kind, id: id.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
