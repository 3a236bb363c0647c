//! The estate CRM application context.
//!
//! [`Agency`] owns one in-process replica per table, serialises mutations per
//! table, flushes every change to a [`RecordStore`] and sends best-effort
//! notifications through a [`Notifier`]. Everything a caller can do to the
//! records goes through it.
//!
//! [`RecordStore`]: estate_core::store::RecordStore
//! [`Notifier`]: estate_core::notify::Notifier

mod agency;
mod auth;
mod clients;
mod deals;
mod listings;
mod users;

pub mod mailer;
pub mod receipt;
pub mod reports;
pub mod settings;

pub use agency::Agency;
pub use mailer::Mailer;
pub use receipt::{Receipt, Warning};
pub use settings::{AdminSeed, AgencySettings};
