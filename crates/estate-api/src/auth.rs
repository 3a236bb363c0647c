//! HTTP Basic-auth extractor.
//!
//! Every route needs credentials. They are checked against the user table on
//! each request; there are no sessions.

use std::sync::Arc;

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use estate_agency::Agency;
use estate_core::{notify::Notifier, store::RecordStore, user::Actor};

use crate::error::ApiError;

/// The authenticated caller. Present in a handler means the request carried
/// valid credentials for an active user.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Actor);

/// Pull `(username, password)` out of a `Basic` authorization header.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  Ok((username.to_owned(), password.to_owned()))
}

impl<S, N> FromRequestParts<Arc<Agency<S, N>>> for Authenticated
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    agency: &Arc<Agency<S, N>>,
  ) -> Result<Self, Self::Rejection> {
    let (username, password) = basic_credentials(&parts.headers)?;
    let actor = agency.authenticate(&username, &password).await?;
    Ok(Authenticated(actor))
  }
}
