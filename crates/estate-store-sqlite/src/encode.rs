//! Conversion between [`Row`]s and the plain-text columns stored in SQLite.

use estate_core::store::{Row, Table};

use crate::{Error, Result};

/// Raw strings read directly from a table row.
pub struct RawRow {
  pub row_key: String,
  pub data:    String,
}

impl RawRow {
  pub fn into_row(self, table: Table) -> Result<Row> {
    let data = serde_json::from_str(&self.data).map_err(|source| Error::Json {
      table,
      key: self.row_key.clone(),
      source,
    })?;
    Ok(Row { key: self.row_key, data })
  }
}

/// Serialise a row's data for the `data` column.
pub fn encode_data(row: &Row) -> String { row.data.to_string() }
