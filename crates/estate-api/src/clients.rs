//! Handlers for `/clients` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/clients` | Filtered to what the caller may see |
//! | `POST`   | `/clients` | Admin only. Body: [`NewClient`] |
//! | `DELETE` | `/clients/{id}` | Admin only |
//! | `POST`   | `/clients/{id}/status` | Body: `{"status":"Contacted"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use estate_agency::{Agency, Receipt};
use estate_core::{
  client::{Client, NewClient},
  notify::Notifier,
  store::RecordStore,
};
use serde::Deserialize;

use crate::{auth::Authenticated, error::ApiError};

/// `GET /clients`
pub async fn list<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
) -> Json<Vec<Client>>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Json(agency.list_clients(&actor).await)
}

/// `POST /clients`
pub async fn create<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Json(body): Json<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  let receipt = agency.add_client(&actor, body).await?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

/// `DELETE /clients/{id}`
pub async fn delete<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<String>,
) -> Result<Json<Receipt<Client>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.delete_client(&actor, &id).await?))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: String,
}

/// `POST /clients/{id}/status`
pub async fn set_status<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<String>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Receipt<Client>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.update_client_status(&actor, &id, &body.status).await?))
}
