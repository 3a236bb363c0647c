//! [`MemoryStore`], a process-local [`RecordStore`].
//!
//! Used when no durable backend is reachable, and in tests. Nothing survives a
//! restart.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Arc, Mutex, MutexGuard},
};

use crate::store::{RecordStore, Row, Table, TableRows};

/// Cloning is cheap and clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  tables: Arc<Mutex<HashMap<Table, Vec<Row>>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn tables(&self) -> MutexGuard<'_, HashMap<Table, Vec<Row>>> {
    // A panic while holding the lock cannot leave a half-written table: saves
    // swap whole vectors in. Keep serving after poisoning.
    self.tables.lock().unwrap_or_else(|e| e.into_inner())
  }
}

impl RecordStore for MemoryStore {
  type Error = Infallible;

  async fn load(&self, table: Table) -> Result<Vec<Row>, Infallible> {
    Ok(self.tables().get(&table).cloned().unwrap_or_default())
  }

  async fn save_all(&self, batch: Vec<TableRows>) -> Result<(), Infallible> {
    let mut tables = self.tables();
    for TableRows { table, rows } in batch {
      tables.insert(table, rows);
    }
    Ok(())
  }
}
