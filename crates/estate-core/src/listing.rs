//! Property listings the agency can show to clients.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, columns,
  property::{Currency, Furnishing, PropertyCategory, is_known_location},
  store::{Record, Table},
  user::{UNASSIGNED, require},
};

pub const AVAILABLE: &str = "Available";
/// Moving a listing into this status notifies the admin.
pub const SHOWN_TO_CLIENT: &str = "Shown to Client";

/// Statuses the agency uses. Status updates are not checked against this list.
pub const LISTING_STATUSES: &[&str] = &[
  AVAILABLE,
  SHOWN_TO_CLIENT,
  "Client Interested",
  "Under Negotiation",
  "Not Available",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
  pub listing_id:         String,
  pub address:            String,
  pub location:           String,
  pub property_category:  PropertyCategory,
  pub property_type:      String,
  #[serde(with = "columns::not_applicable")]
  pub furnishing:         Option<Furnishing>,
  pub bhk_or_size:        String,
  pub price:              Decimal,
  pub price_currency:     Currency,
  pub area_sqft:          Decimal,
  pub broker_name:        String,
  pub broker_contact:     String,
  #[serde(default)]
  pub amenities:          String,
  /// Open vocabulary; see [`LISTING_STATUSES`].
  pub listing_status:     String,
  pub date_added:         NaiveDate,
  /// Partners only see a listing assigned to them when this is set.
  #[serde(with = "columns::yes_no")]
  pub visible_to_partner: bool,
  #[serde(default)]
  pub notes:              String,
  pub assigned_to:        String,
  /// Names of the clients this listing has been shown to.
  #[serde(deserialize_with = "columns::name_list::deserialize", default)]
  pub shown_to_clients:   Vec<String>,
}

impl Record for Listing {
  const TABLE: Table = Table::Listings;

  fn key(&self) -> &str { &self.listing_id }
}

// ─── NewListing ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
  pub address:            String,
  pub location:           String,
  pub property_category:  PropertyCategory,
  pub property_type:      String,
  #[serde(default)]
  pub furnishing:         Option<Furnishing>,
  pub bhk_or_size:        String,
  pub price:              Decimal,
  #[serde(default)]
  pub price_currency:     Currency,
  pub area_sqft:          Decimal,
  pub broker_name:        String,
  pub broker_contact:     String,
  #[serde(default)]
  pub amenities:          String,
  #[serde(with = "columns::yes_no")]
  pub visible_to_partner: bool,
  #[serde(default)]
  pub notes:              String,
  #[serde(default = "unassigned")]
  pub assigned_to:        String,
}

fn unassigned() -> String { UNASSIGNED.to_owned() }

impl NewListing {
  pub fn validate(&self) -> Result<()> {
    require("address", &self.address)?;
    require("property type", &self.property_type)?;
    require("BHK/size", &self.bhk_or_size)?;
    require("broker name", &self.broker_name)?;
    require("broker contact", &self.broker_contact)?;
    require("assignee", &self.assigned_to)?;

    if !is_known_location(&self.location) {
      return Err(Error::Validation(format!(
        "unknown location: {}",
        self.location
      )));
    }
    if self.price <= Decimal::ZERO {
      return Err(Error::Validation("price must be positive".into()));
    }
    if self.area_sqft <= Decimal::ZERO {
      return Err(Error::Validation("area must be positive".into()));
    }
    if self.property_category == PropertyCategory::Residential
      && self.furnishing.is_none()
    {
      return Err(Error::Validation(
        "furnishing is required for residential property".into(),
      ));
    }
    Ok(())
  }

  pub fn into_listing(self, listing_id: String, today: NaiveDate) -> Listing {
    let furnishing = match self.property_category {
      PropertyCategory::Residential => self.furnishing,
      PropertyCategory::Commercial => None,
    };
    Listing {
      listing_id,
      address: self.address.trim().to_owned(),
      location: self.location,
      property_category: self.property_category,
      property_type: self.property_type,
      furnishing,
      bhk_or_size: self.bhk_or_size,
      price: self.price,
      price_currency: self.price_currency,
      area_sqft: self.area_sqft,
      broker_name: self.broker_name,
      broker_contact: self.broker_contact,
      amenities: self.amenities,
      listing_status: AVAILABLE.to_owned(),
      date_added: today,
      visible_to_partner: self.visible_to_partner,
      notes: self.notes,
      assigned_to: self.assigned_to,
      shown_to_clients: Vec::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn office() -> NewListing {
    NewListing {
      address:            "Unit 402, Hiranandani Business Park".into(),
      location:           "Powai".into(),
      property_category:  PropertyCategory::Commercial,
      property_type:      "Office Space".into(),
      furnishing:         Some(Furnishing::Furnished),
      bhk_or_size:        "2000 sq ft".into(),
      price:              Decimal::new(15, 1),
      price_currency:     Currency::Crores,
      area_sqft:          Decimal::from(2000),
      broker_name:        "Sanjay".into(),
      broker_contact:     "98200 11111".into(),
      amenities:          String::new(),
      visible_to_partner: true,
      notes:              String::new(),
      assigned_to:        UNASSIGNED.into(),
    }
  }

  #[test]
  fn valid_listing_passes() {
    assert!(office().validate().is_ok());
  }

  #[test]
  fn zero_price_is_rejected() {
    let mut l = office();
    l.price = Decimal::ZERO;
    assert!(matches!(l.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn unknown_location_is_rejected() {
    let mut l = office();
    l.location = "Bandra".into();
    assert!(matches!(l.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn new_listing_is_available_and_unshown() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let listing = office().into_listing("L0001".into(), today);
    assert_eq!(listing.listing_status, AVAILABLE);
    assert!(listing.shown_to_clients.is_empty());
    // Commercial property never carries a furnishing.
    assert_eq!(listing.furnishing, None);
  }

  #[test]
  fn visibility_flag_is_stored_as_yes_no() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let listing = office().into_listing("L0001".into(), today);
    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["visible_to_partner"], "Yes");
    assert_eq!(json["furnishing"], "N/A");
  }

  #[test]
  fn viewer_names_keep_their_commas() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut listing = office().into_listing("L0001".into(), today);
    listing.shown_to_clients = vec!["Shah, Meera".into(), "Asha".into()];
    let row = listing.to_row().unwrap();
    let back = Listing::from_row(row).unwrap();
    assert_eq!(back.shown_to_clients, vec!["Shah, Meera", "Asha"]);
  }
}
