//! Handlers for `/me`, `/partners` and `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/me` | The authenticated actor |
//! | `GET`    | `/partners` | Partner profiles, for choosing assignees |
//! | `GET`    | `/users` | Admin only |
//! | `POST`   | `/users` | Body: [`NewUser`] |
//! | `PATCH`  | `/users/{username}` | Body: [`UserUpdate`] |
//! | `DELETE` | `/users/{username}` | The `admin` account cannot be deleted |
//! | `POST`   | `/users/{username}/status` | Body: `{"status":"Inactive"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use estate_agency::{Agency, Receipt};
use estate_core::{
  notify::Notifier,
  store::RecordStore,
  user::{Actor, NewUser, UserProfile, UserStatus, UserUpdate},
};
use serde::Deserialize;

use crate::{auth::Authenticated, error::ApiError};

/// `GET /me`
pub async fn me<S, N>(
  State(_): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
) -> Json<Actor>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Json(actor)
}

/// `GET /partners`
pub async fn partners<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(_): Authenticated,
) -> Json<Vec<UserProfile>>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Json(agency.partners().await)
}

/// `GET /users`
pub async fn list<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
) -> Result<Json<Vec<UserProfile>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.list_users(&actor).await?))
}

/// `POST /users`
pub async fn create<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  let receipt = agency.add_user(&actor, body).await?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

/// `PATCH /users/{username}`
pub async fn update<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(username): Path<String>,
  Json(body): Json<UserUpdate>,
) -> Result<Json<Receipt<UserProfile>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.update_user(&actor, &username, body).await?))
}

/// `DELETE /users/{username}`
pub async fn delete<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(username): Path<String>,
) -> Result<Json<Receipt<UserProfile>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.delete_user(&actor, &username).await?))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: UserStatus,
}

/// `POST /users/{username}/status`
pub async fn set_status<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(username): Path<String>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Receipt<UserProfile>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.set_user_status(&actor, &username, body.status).await?))
}
