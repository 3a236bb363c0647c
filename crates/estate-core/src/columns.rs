//! Column encodings shared with the tabular store.
//!
//! Records round-trip through a spreadsheet-shaped table, so a few fields keep
//! the cell formats the sheets have always used: `Yes`/`No` flags and `N/A`
//! for an absent value. Use these with `#[serde(with = ...)]` or
//! `#[serde(deserialize_with = ...)]`.

/// A list of names. Written as a JSON array; older rows hold one
/// `", "`-joined cell, which is split on read.
pub mod name_list {
  use serde::{Deserialize, Deserializer};

  pub fn split(cell: &str) -> Vec<String> {
    cell
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_owned)
      .collect()
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
      List(Vec<String>),
      Joined(String),
    }

    Ok(match Option::<Cell>::deserialize(d)? {
      None => Vec::new(),
      Some(Cell::List(items)) => items,
      Some(Cell::Joined(cell)) => split(&cell),
    })
  }
}

/// A boolean flag stored as `Yes` / `No`.
pub mod yes_no {
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(flag: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(if *flag { "Yes" } else { "No" })
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
      Flag(bool),
      Text(String),
    }

    match Cell::deserialize(d)? {
      Cell::Flag(b) => Ok(b),
      Cell::Text(t) if t.eq_ignore_ascii_case("yes") => Ok(true),
      Cell::Text(t) if t.eq_ignore_ascii_case("no") => Ok(false),
      Cell::Text(other) => Err(D::Error::custom(format!(
        "expected Yes or No, found {other:?}"
      ))),
    }
  }
}

/// An optional value stored as its display form, or `N/A` when absent.
pub mod not_applicable {
  use std::{fmt::Display, str::FromStr};

  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub const NOT_APPLICABLE: &str = "N/A";

  pub fn serialize<T: Display, S: Serializer>(
    value: &Option<T>,
    s: S,
  ) -> Result<S::Ok, S::Error> {
    match value {
      Some(v) => s.collect_str(v),
      None => s.serialize_str(NOT_APPLICABLE),
    }
  }

  pub fn deserialize<'de, T, D>(d: D) -> Result<Option<T>, D::Error>
  where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
  {
    match Option::<String>::deserialize(d)? {
      None => Ok(None),
      Some(cell) if cell.is_empty() || cell == NOT_APPLICABLE => Ok(None),
      Some(cell) => cell.parse().map(Some).map_err(D::Error::custom),
    }
  }
}
