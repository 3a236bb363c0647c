//! Handlers for `/deals` and `/commission` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/deals` | Filtered to what the caller may see |
//! | `POST`   | `/deals` | Admin only. Body: [`NewDeal`] |
//! | `DELETE` | `/deals/{id}` | Admin only |
//! | `POST`   | `/deals/{id}/payment` | Body: `{"payment_status":"Paid"}` |
//! | `POST`   | `/commission/preview` | Live split, nothing stored |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use estate_agency::{Agency, Receipt};
use estate_core::{
  commission::CommissionSplit,
  deal::{Deal, NewDeal, PaymentStatus},
  notify::Notifier,
  store::RecordStore,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{auth::Authenticated, error::ApiError};

/// `GET /deals`
pub async fn list<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
) -> Json<Vec<Deal>>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Json(agency.list_deals(&actor).await)
}

/// `POST /deals`
pub async fn create<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Json(body): Json<NewDeal>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  let receipt = agency.close_deal(&actor, body).await?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

/// `DELETE /deals/{id}`
pub async fn delete<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<String>,
) -> Result<Json<Receipt<Deal>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.delete_deal(&actor, &id).await?))
}

#[derive(Debug, Deserialize)]
pub struct PaymentBody {
  pub payment_status: PaymentStatus,
}

/// `POST /deals/{id}/payment`
pub async fn set_payment<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(actor): Authenticated,
  Path(id): Path<String>,
  Json(body): Json<PaymentBody>,
) -> Result<Json<Receipt<Deal>>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  Ok(Json(agency.set_payment_status(&actor, &id, body.payment_status).await?))
}

// ─── Preview ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PreviewBody {
  pub brokerage_from_owner:  Decimal,
  pub brokerage_from_client: Decimal,
  #[serde(default = "one")]
  pub number_of_brokers:     u32,
}

fn one() -> u32 { 1 }

/// The exact split alongside the whole-rupee figures shown to people.
#[derive(Debug, Serialize)]
pub struct Preview {
  pub exact:   CommissionSplit,
  pub rounded: CommissionSplit,
}

/// `POST /commission/preview`
pub async fn preview<S, N>(
  State(agency): State<Arc<Agency<S, N>>>,
  Authenticated(_): Authenticated,
  Json(body): Json<PreviewBody>,
) -> Result<Json<Preview>, ApiError>
where
  S: RecordStore + 'static,
  N: Notifier + 'static,
{
  let exact = agency.preview_commission(
    body.brokerage_from_owner,
    body.brokerage_from_client,
    body.number_of_brokers,
  )?;
  Ok(Json(Preview { exact, rounded: exact.rounded() }))
}
