//! Core types and trait definitions for the estate CRM.
//!
//! No HTTP or database code lives here. The crate holds the record types,
//! the commission and identifier rules, the visibility filter, and the seams
//! (`RecordStore`, `Notifier`) that other crates implement.

// Store and notifier impls use `async fn`; the traits spell out `Send`.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod columns;
pub mod commission;
pub mod deal;
pub mod error;
pub mod id;
pub mod listing;
pub mod memory;
pub mod notify;
pub mod password;
pub mod property;
pub mod store;
pub mod user;
pub mod visibility;

pub use error::{Error, Result};
