//! The `RecordStore` trait and the row format it persists.
//!
//! The store behaves like a workbook of four sheets: each table is an ordered
//! list of rows, read whole and overwritten whole. Backends (e.g.
//! `estate-store-sqlite`, [`MemoryStore`](crate::memory::MemoryStore)) do not
//! know about record types; they move [`Row`]s.

use std::future::Future;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::{Display, EnumString};

use crate::Result;

// ─── Tables and rows ─────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
  Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Table {
  Users,
  Clients,
  Listings,
  Deals,
}

impl Table {
  pub const ALL: [Table; 4] = [Table::Users, Table::Clients, Table::Listings, Table::Deals];
}

/// One persisted row: the record's primary key and its encoded fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
  pub key:  String,
  pub data: serde_json::Value,
}

/// The full replacement contents of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRows {
  pub table: Table,
  pub rows:  Vec<Row>,
}

/// A record type that lives in one of the store's tables.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
  const TABLE: Table;

  /// The primary key; unique within the table.
  fn key(&self) -> &str;

  fn to_row(&self) -> Result<Row> {
    Ok(Row { key: self.key().to_owned(), data: serde_json::to_value(self)? })
  }

  fn from_row(row: Row) -> Result<Self> { Ok(serde_json::from_value(row.data)?) }
}

/// Encode a whole table for [`RecordStore::save_all`].
pub fn table_rows<R: Record>(records: &[R]) -> Result<TableRows> {
  Ok(TableRows {
    table: R::TABLE,
    rows:  records.iter().map(R::to_row).collect::<Result<_>>()?,
  })
}

pub fn decode_rows<R: Record>(rows: Vec<Row>) -> Result<Vec<R>> {
  rows.into_iter().map(R::from_row).collect()
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over durable table storage.
///
/// Row order is preserved. A save replaces the named tables entirely; when a
/// batch names several tables, either all of them are replaced or none is.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every row of `table`, in stored order. An unknown or never-written
  /// table reads as empty.
  fn load(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// Overwrite every table in `batch` atomically.
  fn save_all(
    &self,
    batch: Vec<TableRows>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Overwrite a single table.
  fn save(
    &self,
    table: Table,
    rows: Vec<Row>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_ {
    self.save_all(vec![TableRows { table, rows }])
  }
}
