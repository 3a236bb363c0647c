//! Closed deals and the commission recorded against them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
  Result, columns,
  commission::CommissionSplit,
  store::{Record, Table},
  user::require,
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum PaymentStatus {
  #[default]
  Pending,
  Paid,
}

/// A closed deal. Everything except `payment_status` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
  pub deal_id:               String,
  pub client_id:             String,
  /// `None` when the deal was not tied to a specific listing.
  #[serde(with = "columns::not_applicable")]
  pub listing_id:            Option<String>,
  pub brokerage_from_owner:  Decimal,
  pub brokerage_from_client: Decimal,
  pub total_brokerage:       Decimal,
  pub number_of_brokers:     u32,
  pub per_broker:            Decimal,
  /// The agency's 90% of the per-broker amount.
  pub your_share:            Decimal,
  /// The partner's 10% of the per-broker amount.
  pub partner_share:         Decimal,
  pub partner_name:          String,
  pub deal_date:             NaiveDate,
  #[serde(default)]
  pub payment_status:        PaymentStatus,
  #[serde(default)]
  pub notes:                 String,
}

impl Record for Deal {
  const TABLE: Table = Table::Deals;

  fn key(&self) -> &str { &self.deal_id }
}

// ─── NewDeal ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewDeal {
  pub client_id:             String,
  #[serde(default, with = "columns::not_applicable")]
  pub listing_id:            Option<String>,
  pub brokerage_from_owner:  Decimal,
  pub brokerage_from_client: Decimal,
  pub number_of_brokers:     u32,
  pub partner_name:          String,
  #[serde(default)]
  pub notes:                 String,
}

impl NewDeal {
  /// Field presence only. Amounts are checked by
  /// [`commission::compute`](crate::commission::compute); references are
  /// checked against the tables by the caller.
  pub fn validate(&self) -> Result<()> {
    require("client", &self.client_id)?;
    require("partner", &self.partner_name)?;
    Ok(())
  }

  pub fn into_deal(
    self,
    deal_id: String,
    split: CommissionSplit,
    today: NaiveDate,
  ) -> Deal {
    Deal {
      deal_id,
      client_id: self.client_id,
      listing_id: self.listing_id,
      brokerage_from_owner: self.brokerage_from_owner,
      brokerage_from_client: self.brokerage_from_client,
      total_brokerage: split.total,
      number_of_brokers: self.number_of_brokers,
      per_broker: split.per_broker,
      your_share: split.primary_share,
      partner_share: split.partner_share,
      partner_name: self.partner_name,
      deal_date: today,
      payment_status: PaymentStatus::Pending,
      notes: self.notes,
    }
  }
}
