//! Vocabulary shared by clients and listings: zones, categories, furnishing,
//! and the currency units prices are quoted in.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The zones the agency operates in. Client preferences and listing
/// locations must come from this list.
pub const LOCATIONS: &[&str] = &[
  "Sakinaka",
  "Chandivali",
  "Marol",
  "JB Nagar",
  "Chakala",
  "Kurla",
  "Powai",
  "Andheri-Kurla Road",
  "Andheri East",
  "Andheri West",
  "Ghatkopar",
  "Vikhroli",
  "Bhandup",
  "Mulund",
  "Other",
];

pub fn is_known_location(zone: &str) -> bool { LOCATIONS.contains(&zone) }

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum PropertyCategory {
  Residential,
  Commercial,
}

/// Only meaningful for residential property; commercial rows carry `N/A`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum Furnishing {
  Furnished,
  #[serde(rename = "Semi-Furnished")]
  #[strum(serialize = "Semi-Furnished")]
  SemiFurnished,
  Unfurnished,
}

/// The unit a budget or price is quoted in. Amounts are stored as entered;
/// no conversion happens between units.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum Currency {
  #[default]
  #[serde(rename = "₹ Rupees")]
  #[strum(serialize = "₹ Rupees")]
  Rupees,
  #[serde(rename = "₹ Lakhs")]
  #[strum(serialize = "₹ Lakhs")]
  Lakhs,
  #[serde(rename = "₹ Crores")]
  #[strum(serialize = "₹ Crores")]
  Crores,
}
