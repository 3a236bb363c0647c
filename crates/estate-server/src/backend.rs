//! The store the server runs on: SQLite when it opens, memory otherwise.

use std::path::Path;

use estate_core::{
  memory::MemoryStore,
  store::{RecordStore, Row, Table, TableRows},
};
use estate_store_sqlite::SqliteStore;
use tracing::{info, warn};

#[derive(Clone)]
pub enum Backend {
  Sqlite(SqliteStore),
  Memory(MemoryStore),
}

impl Backend {
  /// Open the SQLite store at `path`, falling back to a memory store.
  pub async fn open(path: &Path) -> Self {
    match SqliteStore::open(path).await {
      Ok(store) => {
        info!(path = %path.display(), "opened sqlite store");
        Self::Sqlite(store)
      }
      Err(error) => {
        warn!(
          path = %path.display(),
          %error,
          "cannot open sqlite store; records will not survive a restart"
        );
        Self::Memory(MemoryStore::new())
      }
    }
  }

  pub fn is_durable(&self) -> bool { matches!(self, Self::Sqlite(_)) }
}

impl RecordStore for Backend {
  type Error = estate_store_sqlite::Error;

  async fn load(&self, table: Table) -> Result<Vec<Row>, Self::Error> {
    match self {
      Self::Sqlite(store) => store.load(table).await,
      Self::Memory(store) => match store.load(table).await {
        Ok(rows) => Ok(rows),
        Err(never) => match never {},
      },
    }
  }

  async fn save_all(&self, batch: Vec<TableRows>) -> Result<(), Self::Error> {
    match self {
      Self::Sqlite(store) => store.save_all(batch).await,
      Self::Memory(store) => match store.save_all(batch).await {
        Ok(()) => Ok(()),
        Err(never) => match never {},
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[tokio::test]
  async fn unopenable_path_falls_back_to_memory() {
    let path = std::env::temp_dir()
      .join("estate-missing-dir")
      .join("nested")
      .join("estate.db");
    let backend = Backend::open(&path).await;
    assert!(!backend.is_durable());

    let rows = vec![Row { key: "C0001".into(), data: json!({ "name": "Asha" }) }];
    backend.save(Table::Clients, rows.clone()).await.unwrap();
    assert_eq!(backend.load(Table::Clients).await.unwrap(), rows);
  }

  #[tokio::test]
  async fn writable_path_opens_sqlite() {
    let path = std::env::temp_dir().join(format!("estate-backend-{}.db", std::process::id()));
    let backend = Backend::open(&path).await;
    assert!(backend.is_durable());
    assert!(backend.load(Table::Users).await.unwrap().is_empty());
    drop(backend);
    let _ = std::fs::remove_file(&path);
  }
}
