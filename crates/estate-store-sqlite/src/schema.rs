//! SQL schema for the estate SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use estate_core::store::Table;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every table has the same shape: one row per record, kept in the order the
/// application last saved them.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    position INTEGER PRIMARY KEY,
    row_key  TEXT NOT NULL UNIQUE,   -- username
    data     TEXT NOT NULL           -- JSON-encoded record
);

CREATE TABLE IF NOT EXISTS clients (
    position INTEGER PRIMARY KEY,
    row_key  TEXT NOT NULL UNIQUE,   -- client_id, e.g. C0001
    data     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS listings (
    position INTEGER PRIMARY KEY,
    row_key  TEXT NOT NULL UNIQUE,   -- listing_id, e.g. L0001
    data     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS deals (
    position INTEGER PRIMARY KEY,
    row_key  TEXT NOT NULL UNIQUE,   -- deal_id, e.g. D0001
    data     TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// The SQL table backing `table`. Names are fixed, so they are safe to splice
/// into statements.
pub fn table_name(table: Table) -> &'static str {
  match table {
    Table::Users => "users",
    Table::Clients => "clients",
    Table::Listings => "listings",
    Table::Deals => "deals",
  }
}
