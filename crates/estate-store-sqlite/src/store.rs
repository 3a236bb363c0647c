//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use estate_core::store::{RecordStore, Row, Table, TableRows};

use crate::{
  Result,
  encode::{RawRow, encode_data},
  schema::{SCHEMA, table_name},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An estate record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn load(&self, table: Table) -> Result<Vec<Row>> {
    let sql = format!(
      "SELECT row_key, data FROM {} ORDER BY position",
      table_name(table)
    );

    let raws: Vec<RawRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawRow {
              row_key: row.get(0)?,
              data:    row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(|raw| raw.into_row(table)).collect()
  }

  async fn save_all(&self, batch: Vec<TableRows>) -> Result<()> {
    // Encode up front so the closure only touches plain strings.
    let encoded: Vec<(&'static str, Vec<(String, String)>)> = batch
      .into_iter()
      .map(|TableRows { table, rows }| {
        let rows = rows
          .into_iter()
          .map(|row| {
            let data = encode_data(&row);
            (row.key, data)
          })
          .collect();
        (table_name(table), rows)
      })
      .collect();

    let written: usize = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut written = 0;
        for (name, rows) in &encoded {
          tx.execute(&format!("DELETE FROM {name}"), [])?;
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO {name} (position, row_key, data) VALUES (?1, ?2, ?3)"
          ))?;
          for (position, (key, data)) in rows.iter().enumerate() {
            stmt.execute(rusqlite::params![position as i64, key, data])?;
            written += 1;
          }
        }
        tx.commit()?;
        Ok(written)
      })
      .await?;

    tracing::debug!(rows = written, "saved tables");
    Ok(())
  }
}
