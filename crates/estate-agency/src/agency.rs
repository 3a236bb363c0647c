//! [`Agency`]: the explicit application context.

use std::{future::Future, time::Duration};

use chrono::NaiveDate;
use estate_core::{
  Result,
  client::Client,
  deal::Deal,
  id::{CLIENT_PREFIX, DEAL_PREFIX, IdSequence, LISTING_PREFIX},
  listing::Listing,
  notify::{Email, Notifier},
  store::{Record, RecordStore, Table, TableRows, decode_rows, table_rows},
  user::{RESERVED_ADMIN, Role, User, UserStatus},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{AgencySettings, Receipt, Warning};

// ─── Sheets ──────────────────────────────────────────────────────────────────

/// The in-process replica of one id-keyed table.
#[derive(Debug, Clone)]
pub(crate) struct Sheet<R> {
  pub rows: Vec<R>,
  pub ids:  IdSequence,
}

impl<R: Record> Sheet<R> {
  fn new(prefix: &'static str, rows: Vec<R>) -> Self {
    let ids = IdSequence::from_existing(prefix, rows.iter().map(R::key));
    Self { rows, ids }
  }

  pub fn get(&self, key: &str) -> Option<&R> { self.rows.iter().find(|r| r.key() == key) }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut R> {
    self.rows.iter_mut().find(|r| r.key() == key)
  }

  /// Remove the row with `key`, returning it.
  pub fn remove(&mut self, key: &str) -> Option<R> {
    let index = self.rows.iter().position(|r| r.key() == key)?;
    Some(self.rows.remove(index))
  }
}

/// Everything read from the store at startup.
struct Loaded {
  users:    Vec<User>,
  clients:  Vec<Client>,
  listings: Vec<Listing>,
  deals:    Vec<Deal>,
}

// ─── Agency ──────────────────────────────────────────────────────────────────

/// Owns the table replicas and the collaborators every operation needs.
///
/// Each table sits behind its own lock, held across read, mutate, save and
/// swap. Operations spanning several tables lock them in the order users,
/// clients, listings, deals.
pub struct Agency<S, N> {
  pub(crate) store:    S,
  pub(crate) notifier: N,
  pub(crate) settings: AgencySettings,
  /// Set when the startup load failed; the store is never written again.
  pub(crate) detached: bool,
  pub(crate) users:    Mutex<Vec<User>>,
  pub(crate) clients:  Mutex<Sheet<Client>>,
  pub(crate) listings: Mutex<Sheet<Listing>>,
  pub(crate) deals:    Mutex<Sheet<Deal>>,
}

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  /// Load every table from `store` and make sure the reserved admin exists.
  ///
  /// If the store cannot be read the agency starts from empty tables and runs
  /// in memory only, so a flaky store is never overwritten with a partial
  /// view. The returned receipt carries a warning in that case.
  pub async fn open(store: S, notifier: N, settings: AgencySettings) -> Result<Receipt<Self>> {
    let mut warnings = Vec::new();

    let (loaded, detached) = match load_all(&store, settings.store_timeout).await {
      Ok(loaded) => (loaded, false),
      Err(detail) => {
        warn!(%detail, "record store unavailable; running in memory-only mode");
        warnings.push(Warning::StoreUnavailable { detail });
        let empty = Loaded {
          users:    Vec::new(),
          clients:  Vec::new(),
          listings: Vec::new(),
          deals:    Vec::new(),
        };
        (empty, true)
      }
    };

    info!(
      users = loaded.users.len(),
      clients = loaded.clients.len(),
      listings = loaded.listings.len(),
      deals = loaded.deals.len(),
      detached,
      "tables loaded"
    );

    let mut users = loaded.users;
    let needs_admin = !users.iter().any(User::is_reserved_admin);
    if needs_admin {
      users.push(User {
        username:      RESERVED_ADMIN.to_owned(),
        password_hash: settings.admin.password_hash.clone(),
        role:          Role::Admin,
        full_name:     settings.admin.full_name.clone(),
        email:         settings.admin.email.clone(),
        status:        UserStatus::Active,
      });
    }

    let agency = Self {
      store,
      notifier,
      settings,
      detached,
      users: Mutex::new(users),
      clients: Mutex::new(Sheet::new(CLIENT_PREFIX, loaded.clients)),
      listings: Mutex::new(Sheet::new(LISTING_PREFIX, loaded.listings)),
      deals: Mutex::new(Sheet::new(DEAL_PREFIX, loaded.deals)),
    };

    if needs_admin && !detached {
      info!("seeding reserved admin account");
      let batch = {
        let users = agency.users.lock().await;
        table_rows(users.as_slice())?
      };
      warnings.extend(agency.flush(vec![batch]).await);
    }

    Ok(Receipt::with_warnings(agency, warnings))
  }

  /// Whether the agency lost its store at startup and keeps changes in memory.
  pub fn is_detached(&self) -> bool { self.detached }

  /// Write `batch` to the store. A failure keeps the in-memory change and
  /// comes back as a warning.
  pub(crate) async fn flush(&self, batch: Vec<TableRows>) -> Option<Warning> {
    if self.detached {
      return Some(Warning::StoreUnavailable {
        detail: "running in memory-only mode".into(),
      });
    }

    let tables: Vec<Table> = batch.iter().map(|t| t.table).collect();
    match bounded(self.settings.store_timeout, self.store.save_all(batch)).await {
      Ok(()) => {
        debug!(?tables, "tables saved");
        None
      }
      Err(detail) => {
        warn!(?tables, %detail, "store save failed; change kept in memory");
        Some(Warning::StoreUnavailable { detail })
      }
    }
  }

  /// Send `email` after a committed change. A failure is logged and reported,
  /// never propagated.
  pub(crate) async fn notify(&self, email: Email) -> Option<Warning> {
    let to = email.to.clone();
    let subject = email.subject.clone();
    match bounded(self.settings.notify_timeout, self.notifier.send(email)).await {
      Ok(()) => {
        debug!(%to, %subject, "notification sent");
        None
      }
      Err(detail) => {
        warn!(%to, %subject, %detail, "notification failed");
        Some(Warning::NotificationFailed { to, detail })
      }
    }
  }

  /// The reserved admin's email address, if one is on file.
  pub(crate) async fn admin_email(&self) -> Option<String> {
    let users = self.users.lock().await;
    users
      .iter()
      .find(|u| u.is_reserved_admin())
      .map(|u| u.email.clone())
      .filter(|e| !e.trim().is_empty())
  }
}

pub(crate) fn today() -> NaiveDate { chrono::Local::now().date_naive() }

/// Run a store or notifier call with a deadline, flattening both failure
/// modes into a message.
async fn bounded<T, E: std::fmt::Display>(
  limit: Duration,
  call: impl Future<Output = std::result::Result<T, E>>,
) -> std::result::Result<T, String> {
  match tokio::time::timeout(limit, call).await {
    Ok(Ok(value)) => Ok(value),
    Ok(Err(e)) => Err(e.to_string()),
    Err(_) => Err(format!("timed out after {}s", limit.as_secs_f32())),
  }
}

async fn load_table<S: RecordStore, R: Record>(
  store: &S,
  limit: Duration,
) -> std::result::Result<Vec<R>, String> {
  let rows = bounded(limit, store.load(R::TABLE)).await?;
  decode_rows(rows).map_err(|e| format!("{} table is unreadable: {e}", R::TABLE))
}

async fn load_all<S: RecordStore>(
  store: &S,
  limit: Duration,
) -> std::result::Result<Loaded, String> {
  Ok(Loaded {
    users:    load_table(store, limit).await?,
    clients:  load_table(store, limit).await?,
    listings: load_table(store, limit).await?,
    deals:    load_table(store, limit).await?,
  })
}
