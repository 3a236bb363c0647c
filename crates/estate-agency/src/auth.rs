//! Login.

use estate_core::{
  Error, Result,
  notify::Notifier,
  password::{Verification, burn_verification, hash_password, verify_password},
  store::{RecordStore, table_rows},
  user::Actor,
};
use tracing::{info, warn};

use crate::Agency;

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  /// Resolve credentials to an [`Actor`].
  ///
  /// Unknown users, disabled users and wrong passwords all fail with the same
  /// [`Error::Auth`]. A correct password stored under a legacy digest is
  /// re-hashed with argon2 before returning.
  pub async fn authenticate(&self, username: &str, password: &str) -> Result<Actor> {
    let stored = {
      let users = self.users.lock().await;
      users.iter().find(|u| u.username == username).cloned()
    };

    let Some(user) = stored.filter(|u| u.is_active()) else {
      burn_verification(password);
      return Err(Error::Auth);
    };

    match verify_password(password, &user.password_hash) {
      Verification::Valid => {}
      Verification::ValidLegacy => self.upgrade_hash(&user.username, password).await,
      Verification::Invalid => return Err(Error::Auth),
    }

    Ok(Actor::from(&user))
  }

  /// Replace a legacy digest with an argon2 hash. Failure leaves the legacy
  /// hash in place; the login itself already succeeded.
  async fn upgrade_hash(&self, username: &str, password: &str) {
    let hash = match hash_password(password) {
      Ok(hash) => hash,
      Err(e) => {
        warn!(%username, error = %e, "could not re-hash legacy password");
        return;
      }
    };

    let mut users = self.users.lock().await;
    let mut next = users.clone();
    let Some(user) = next.iter_mut().find(|u| u.username == username) else {
      return;
    };
    user.password_hash = hash;

    let batch = match table_rows(next.as_slice()) {
      Ok(batch) => batch,
      Err(e) => {
        warn!(%username, error = %e, "could not encode user table");
        return;
      }
    };
    // A store failure is already logged by `flush`; the upgrade stays in
    // memory and is retried by the next successful users save.
    let _ = self.flush(vec![batch]).await;
    *users = next;
    info!(%username, "upgraded legacy password hash");
  }
}
