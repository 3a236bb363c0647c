//! Client records: people looking to buy or rent through the agency.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
  Error, Result, columns,
  property::{Currency, Furnishing, PropertyCategory, is_known_location},
  store::{Record, Table},
  user::{UNASSIGNED, require},
};

/// Status every new client starts in.
pub const NEW_LEAD: &str = "New Lead";
/// Status forced onto a client when a deal is closed for them.
pub const DEAL_CLOSED: &str = "Deal Closed";

/// Statuses the agency uses. Status updates are not checked against this list.
pub const CLIENT_STATUSES: &[&str] = &[
  NEW_LEAD,
  "Contacted",
  "Site Visit Scheduled",
  "Site Visit Done",
  "Interested",
  "Negotiation",
  "Deal in Progress",
  "On Hold",
  "Not Interested",
  DEAL_CLOSED,
];

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum ClientType {
  Sale,
  Rental,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

/// Where the lead came from.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum LeadSource {
  SquareYards,
  Referral,
  #[default]
  Direct,
  Website,
  Other,
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  pub client_id:           String,
  pub name:                String,
  pub contact:             String,
  #[serde(default)]
  pub email:               String,
  pub client_type:         ClientType,
  pub property_category:   PropertyCategory,
  pub property_type:       String,
  #[serde(with = "columns::not_applicable")]
  pub furnishing:          Option<Furnishing>,
  pub budget_min:          Decimal,
  pub budget_max:          Decimal,
  pub budget_currency:     Currency,
  #[serde(deserialize_with = "columns::name_list::deserialize")]
  pub location_preference: Vec<String>,
  pub bhk_or_size:         String,
  #[serde(default)]
  pub requirements_notes:  String,
  /// Only set for rentals.
  #[serde(default)]
  pub possession_date:     Option<NaiveDate>,
  /// Open vocabulary; see [`CLIENT_STATUSES`].
  pub status:              String,
  /// A partner's full name, [`UNASSIGNED`], or
  /// [`ADMIN_ASSIGNEE`](crate::user::ADMIN_ASSIGNEE).
  pub assigned_to:         String,
  pub date_registered:     NaiveDate,
  pub source:              LeadSource,
  pub priority:            Priority,
}

impl Record for Client {
  const TABLE: Table = Table::Clients;

  fn key(&self) -> &str { &self.client_id }
}

// ─── NewClient ───────────────────────────────────────────────────────────────

/// Input to create a client. Id, status and registration date are assigned
/// by the agency.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
  pub name:                String,
  pub contact:             String,
  #[serde(default)]
  pub email:               String,
  pub client_type:         ClientType,
  pub property_category:   PropertyCategory,
  pub property_type:       String,
  #[serde(default)]
  pub furnishing:          Option<Furnishing>,
  pub budget_min:          Decimal,
  pub budget_max:          Decimal,
  #[serde(default)]
  pub budget_currency:     Currency,
  pub location_preference: Vec<String>,
  #[serde(default)]
  pub bhk_or_size:         String,
  #[serde(default)]
  pub requirements_notes:  String,
  #[serde(default)]
  pub possession_date:     Option<NaiveDate>,
  #[serde(default = "unassigned")]
  pub assigned_to:         String,
  #[serde(default)]
  pub source:              LeadSource,
  #[serde(default)]
  pub priority:            Priority,
}

fn unassigned() -> String { UNASSIGNED.to_owned() }

impl NewClient {
  /// Check required fields and ranges. The assignee is checked against the
  /// user table by the caller.
  pub fn validate(&self) -> Result<()> {
    require("client name", &self.name)?;
    require("contact", &self.contact)?;
    require("property type", &self.property_type)?;
    require("assignee", &self.assigned_to)?;

    if self.location_preference.is_empty() {
      return Err(Error::Validation("at least one location is required".into()));
    }
    if let Some(zone) = self
      .location_preference
      .iter()
      .find(|z| !is_known_location(z))
    {
      return Err(Error::Validation(format!("unknown location: {zone}")));
    }

    if self.budget_min < Decimal::ZERO || self.budget_max < Decimal::ZERO {
      return Err(Error::Validation("budget must not be negative".into()));
    }
    if self.budget_min > self.budget_max {
      return Err(Error::Validation(
        "minimum budget exceeds maximum budget".into(),
      ));
    }

    if self.property_category == PropertyCategory::Residential
      && self.furnishing.is_none()
    {
      return Err(Error::Validation(
        "furnishing is required for residential property".into(),
      ));
    }
    if self.client_type == ClientType::Rental && self.possession_date.is_none() {
      return Err(Error::Validation(
        "possession date is required for rentals".into(),
      ));
    }
    Ok(())
  }

  /// Build the stored record. Commercial clients never carry a furnishing
  /// and sale clients never carry a possession date.
  pub fn into_client(self, client_id: String, today: NaiveDate) -> Client {
    let furnishing = match self.property_category {
      PropertyCategory::Residential => self.furnishing,
      PropertyCategory::Commercial => None,
    };
    let possession_date = match self.client_type {
      ClientType::Rental => self.possession_date,
      ClientType::Sale => None,
    };
    Client {
      client_id,
      name: self.name.trim().to_owned(),
      contact: self.contact.trim().to_owned(),
      email: self.email.trim().to_owned(),
      client_type: self.client_type,
      property_category: self.property_category,
      property_type: self.property_type,
      furnishing,
      budget_min: self.budget_min,
      budget_max: self.budget_max,
      budget_currency: self.budget_currency,
      location_preference: self.location_preference,
      bhk_or_size: self.bhk_or_size,
      requirements_notes: self.requirements_notes,
      possession_date,
      status: NEW_LEAD.to_owned(),
      assigned_to: self.assigned_to,
      date_registered: today,
      source: self.source,
      priority: self.priority,
    }
  }
}
