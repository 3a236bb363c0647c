//! Users, roles, and the authenticated [`Actor`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
  Error, Result,
  store::{Record, Table},
};

/// Username of the reserved administrator account. It always exists and can
/// be neither disabled, deleted, nor demoted.
pub const RESERVED_ADMIN: &str = "admin";

/// Assignee placeholder for rows nobody has picked up yet.
pub const UNASSIGNED: &str = "Unassigned";
/// Assignee placeholder for rows the admin handles personally.
pub const ADMIN_ASSIGNEE: &str = "Admin";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Role {
  Admin,
  Partner,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum UserStatus {
  #[default]
  Active,
  Inactive,
}

// ─── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub username:      String,
  /// argon2 PHC string, or a legacy hex SHA-256 digest awaiting upgrade.
  pub password_hash: String,
  pub role:          Role,
  pub full_name:     String,
  pub email:         String,
  #[serde(default)]
  pub status:        UserStatus,
}

impl User {
  pub fn is_reserved_admin(&self) -> bool { self.username == RESERVED_ADMIN }

  pub fn is_active(&self) -> bool { self.status == UserStatus::Active }
}

impl Record for User {
  const TABLE: Table = Table::Users;

  fn key(&self) -> &str { &self.username }
}

/// A user as shown to other users: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub username:  String,
  pub role:      Role,
  pub full_name: String,
  pub email:     String,
  pub status:    UserStatus,
}

impl From<&User> for UserProfile {
  fn from(u: &User) -> Self {
    Self {
      username:  u.username.clone(),
      role:      u.role,
      full_name: u.full_name.clone(),
      email:     u.email.clone(),
      status:    u.status,
    }
  }
}

// ─── Actor ───────────────────────────────────────────────────────────────────

/// The authenticated user performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub username:  String,
  pub role:      Role,
  pub full_name: String,
}

impl Actor {
  pub fn is_admin(&self) -> bool { self.role == Role::Admin }

  /// Fail with [`Error::Forbidden`] unless the actor is an admin.
  pub fn require_admin(&self, action: &str) -> Result<()> {
    if self.is_admin() {
      Ok(())
    } else {
      Err(Error::Forbidden(format!("only an admin may {action}")))
    }
  }
}

impl From<&User> for Actor {
  fn from(u: &User) -> Self {
    Self {
      username:  u.username.clone(),
      role:      u.role,
      full_name: u.full_name.clone(),
    }
  }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to create a user. The password is hashed before it is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub username:  String,
  pub password:  String,
  pub role:      Role,
  pub full_name: String,
  pub email:     String,
}

impl NewUser {
  pub fn validate(&self) -> Result<()> {
    require("username", &self.username)?;
    require("password", &self.password)?;
    require("full name", &self.full_name)?;
    require("email", &self.email)?;
    if self.username.chars().any(char::is_whitespace) {
      return Err(Error::Validation("username must not contain whitespace".into()));
    }
    Ok(())
  }
}

/// Replacement profile fields for an existing user. A `None` password keeps
/// the current one.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
  pub full_name: String,
  pub email:     String,
  pub role:      Role,
  #[serde(default)]
  pub password:  Option<String>,
}

impl UserUpdate {
  pub fn validate(&self) -> Result<()> {
    require("full name", &self.full_name)?;
    require("email", &self.email)?;
    if let Some(p) = &self.password {
      require("password", p)?;
    }
    Ok(())
  }
}

/// Fail with a validation error if `value` is blank.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(Error::Validation(format!("{field} is required")))
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_user() -> NewUser {
    NewUser {
      username:  "priya".into(),
      password:  "s3cret".into(),
      role:      Role::Partner,
      full_name: "Priya Nair".into(),
      email:     "priya@example.com".into(),
    }
  }

  #[test]
  fn complete_new_user_validates() {
    assert!(new_user().validate().is_ok());
  }

  #[test]
  fn blank_fields_fail_validation() {
    let mut u = new_user();
    u.email = "  ".into();
    assert!(matches!(u.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn usernames_cannot_contain_spaces() {
    let mut u = new_user();
    u.username = "priya nair".into();
    assert!(matches!(u.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn status_defaults_to_active_when_missing() {
    let user: User = serde_json::from_value(serde_json::json!({
      "username": "ravi",
      "password_hash": "x",
      "role": "Partner",
      "full_name": "Ravi",
      "email": "ravi@example.com",
    }))
    .unwrap();
    assert!(user.is_active());
  }

  #[test]
  fn only_admins_pass_require_admin() {
    let admin = Actor { username: "admin".into(), role: Role::Admin, full_name: "Lyndon".into() };
    let partner = Actor { username: "ravi".into(), role: Role::Partner, full_name: "Ravi".into() };
    assert!(admin.require_admin("delete clients").is_ok());
    assert!(matches!(partner.require_admin("delete clients"), Err(Error::Forbidden(_))));
  }
}
