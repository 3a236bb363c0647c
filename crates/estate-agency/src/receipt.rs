//! Results of mutating operations.

use serde::Serialize;

/// The outcome of a committed mutation.
///
/// A mutation that reaches a receipt has been applied to the in-process
/// tables. Warnings report what did not go to plan afterwards: the store
/// write or a notification.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt<T> {
  #[serde(rename = "data")]
  pub value:    T,
  pub warnings: Vec<Warning>,
}

impl<T> Receipt<T> {
  pub fn new(value: T) -> Self { Self { value, warnings: Vec::new() } }

  pub fn with_warnings(value: T, warnings: impl IntoIterator<Item = Warning>) -> Self {
    Self { value, warnings: warnings.into_iter().collect() }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Receipt<U> {
    Receipt { value: f(self.value), warnings: self.warnings }
  }

  pub fn is_clean(&self) -> bool { self.warnings.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
  /// The change is held in memory only and will be lost on restart unless a
  /// later save succeeds.
  StoreUnavailable { detail: String },
  NotificationFailed { to: String, detail: String },
}
