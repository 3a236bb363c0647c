//! `GET /reports/summary`: the dashboard figures for the caller.

use std::sync::Arc;

use axum::{Json, extract::State};
use estate_agency::{Agency, reports::Summary};
use estate_core::{notify::Notifier, store::RecordStore};

use crate::auth::Authenticated;

pub async fn summary<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
) -> Json<Summary>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Json(agency.summary(&actor).await)
}
