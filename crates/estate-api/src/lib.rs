//! JSON REST API for the estate CRM.
//!
//! Exposes an axum [`Router`] over an [`Agency`]. Every route requires HTTP
//! Basic credentials for an active user; TLS and transport concerns are the
//! caller's responsibility.
//!
//! Mutations answer with `{"data": ..., "warnings": [...]}`. A warning means
//! the change was applied but could not be saved or announced.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", estate_api::api_router(agency.clone()))
//! ```

pub mod auth;
pub mod clients;
pub mod deals;
pub mod error;
pub mod listings;
pub mod reports;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, patch, post},
};
use estate_agency::Agency;
use estate_core::{notify::Notifier, store::RecordStore};

pub use error::ApiError;

/// Build the API router for `agency`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, N>(agency: Arc<Agency<S, N>>) -> Router<()>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Router::new()
    // Identity
    .route("/me", get(users::me::<S, N>))
    .route("/partners", get(users::partners::<S, N>))
    // Clients
    .route("/clients", get(clients::list::<S, N>).post(clients::create::<S, N>))
    .route("/clients/{id}", delete(clients::delete::<S, N>))
    .route("/clients/{id}/status", post(clients::set_status::<S, N>))
    // Listings
    .route("/listings", get(listings::list::<S, N>).post(listings::create::<S, N>))
    .route("/listings/{id}", delete(listings::delete::<S, N>))
    .route("/listings/{id}/status", post(listings::set_status::<S, N>))
    // Deals
    .route("/deals", get(deals::list::<S, N>).post(deals::create::<S, N>))
    .route("/deals/{id}", delete(deals::delete::<S, N>))
    .route("/deals/{id}/payment", post(deals::set_payment::<S, N>))
    .route("/commission/preview", post(deals::preview::<S, N>))
    // Users
    .route("/users", get(users::list::<S, N>).post(users::create::<S, N>))
    .route(
      "/users/{username}",
      patch(users::update::<S, N>).delete(users::delete::<S, N>),
    )
    .route("/users/{username}/status", post(users::set_status::<S, N>))
    // Reports
    .route("/reports/summary", get(reports::summary::<S, N>))
    .with_state(agency)
}

#[cfg(test)]
mod tests;
