//! User administration.

use estate_core::{
  Error, Result,
  notify::Notifier,
  password::hash_password,
  store::{RecordStore, table_rows},
  user::{Actor, NewUser, Role, User, UserProfile, UserStatus, UserUpdate},
};
use tracing::info;

use crate::{Agency, Receipt};

impl<S: RecordStore, N: Notifier> Agency<S, N> {
  /// Every user, without password hashes. Admin only.
  pub async fn list_users(&self, actor: &Actor) -> Result<Vec<UserProfile>> {
    actor.require_admin("list users")?;
    let users = self.users.lock().await;
    Ok(users.iter().map(UserProfile::from).collect())
  }

  /// Every partner account, active or not. Used to pick assignees.
  pub async fn partners(&self) -> Vec<UserProfile> {
    let users = self.users.lock().await;
    users
      .iter()
      .filter(|u| u.role == Role::Partner)
      .map(UserProfile::from)
      .collect()
  }

  pub async fn add_user(&self, actor: &Actor, input: NewUser) -> Result<Receipt<UserProfile>> {
    actor.require_admin("add users")?;
    input.validate()?;

    let mut users = self.users.lock().await;
    if users.iter().any(|u| u.username == input.username) {
      return Err(Error::Conflict(format!(
        "username {} is already taken",
        input.username
      )));
    }

    let user = User {
      username:      input.username,
      password_hash: hash_password(&input.password)?,
      role:          input.role,
      full_name:     input.full_name.trim().to_owned(),
      email:         input.email.trim().to_owned(),
      status:        UserStatus::Active,
    };
    let mut next = users.clone();
    next.push(user.clone());

    let batch = table_rows(next.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *users = next;

    info!(username = %user.username, role = %user.role, by = %actor.username, "user added");
    Ok(Receipt::with_warnings(UserProfile::from(&user), warnings))
  }

  /// Replace a user's profile and, optionally, their password. The reserved
  /// admin cannot be demoted.
  pub async fn update_user(
    &self,
    actor: &Actor,
    username: &str,
    update: UserUpdate,
  ) -> Result<Receipt<UserProfile>> {
    actor.require_admin("edit users")?;
    update.validate()?;
    let password_hash = update.password.as_deref().map(hash_password).transpose()?;

    let mut users = self.users.lock().await;
    let mut next = users.clone();
    let user = next
      .iter_mut()
      .find(|u| u.username == username)
      .ok_or_else(|| Error::not_found("user", username))?;

    if user.is_reserved_admin() && update.role != Role::Admin {
      return Err(Error::Conflict("the admin account must keep the Admin role".into()));
    }

    user.full_name = update.full_name.trim().to_owned();
    user.email = update.email.trim().to_owned();
    user.role = update.role;
    if let Some(hash) = password_hash {
      user.password_hash = hash;
    }
    let profile = UserProfile::from(&*user);

    let batch = table_rows(next.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *users = next;

    info!(%username, by = %actor.username, "user updated");
    Ok(Receipt::with_warnings(profile, warnings))
  }

  /// Enable or disable a login. The reserved admin cannot be disabled.
  pub async fn set_user_status(
    &self,
    actor: &Actor,
    username: &str,
    status: UserStatus,
  ) -> Result<Receipt<UserProfile>> {
    actor.require_admin("change user status")?;

    let mut users = self.users.lock().await;
    let mut next = users.clone();
    let user = next
      .iter_mut()
      .find(|u| u.username == username)
      .ok_or_else(|| Error::not_found("user", username))?;

    if user.is_reserved_admin() && status != UserStatus::Active {
      return Err(Error::Conflict("the admin account cannot be disabled".into()));
    }
    user.status = status;
    let profile = UserProfile::from(&*user);

    let batch = table_rows(next.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *users = next;

    info!(%username, %status, by = %actor.username, "user status changed");
    Ok(Receipt::with_warnings(profile, warnings))
  }

  /// Remove a user. Records assigned to them keep their assignee text.
  pub async fn delete_user(&self, actor: &Actor, username: &str) -> Result<Receipt<UserProfile>> {
    actor.require_admin("delete users")?;

    let mut users = self.users.lock().await;
    let mut next = users.clone();
    let index = next
      .iter()
      .position(|u| u.username == username)
      .ok_or_else(|| Error::not_found("user", username))?;
    if next[index].is_reserved_admin() {
      return Err(Error::Conflict("the admin account cannot be deleted".into()));
    }
    let removed = next.remove(index);

    let batch = table_rows(next.as_slice())?;
    let warnings = self.flush(vec![batch]).await;
    *users = next;

    info!(%username, by = %actor.username, "user deleted");
    Ok(Receipt::with_warnings(UserProfile::from(&removed), warnings))
  }
}
