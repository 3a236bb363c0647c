//! Handlers for `/listings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/listings` | Filtered to what the caller may see |
//! | `POST`   | `/listings` | Admin only. Body: [`NewListing`] |
//! | `DELETE` | `/listings/{id}` | Admin only |
//! | `POST`   | `/listings/{id}/status` | Body: `{"status":"Shown to Client","shown_to_clients":["Asha"]}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use estate_agency::{Agency, Receipt};
use estate_core::{
  listing::{Listing, NewListing},
  notify::Notifier,
  store::RecordStore,
};
use serde::Deserialize;

use crate::{auth::Authenticated, error::ApiError};

/// `GET /listings`
pub async fn list<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
) -> Json<Vec<Listing>>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Json(agency.list_listings(&actor).await)
}

/// `POST /listings`
pub async fn create<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Json(body): Json<NewListing>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  let receipt = agency.add_listing(&actor, body).await?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

/// `DELETE /listings/{id}`
pub async fn delete<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<String>,
) -> Result<Json<Receipt<Listing>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.delete_listing(&actor, &id).await?))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status:           String,
  /// Names of the clients the property was shown to. Empty keeps the
  /// recorded list.
  #[serde(default)]
  pub shown_to_clients: Vec<String>,
}

/// `POST /listings/{id}/status`
pub async fn set_status<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<String>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Receipt<Listing>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  let receipt = agency
    .update_listing_status(&actor, &id, &body.status, body.shown_to_clients)
    .await?;
  Ok(Json(receipt))
}
