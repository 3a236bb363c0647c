//! Password hashing and verification.
//!
//! New hashes are salted argon2id PHC strings. The user sheet historically
//! stored unsalted SHA-256 hex digests; those still verify, and the caller is
//! told so it can replace them with an argon2 hash.

use std::sync::OnceLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
  Valid,
  /// Correct password, but the stored hash is a legacy digest.
  ValidLegacy,
  Invalid,
}

impl Verification {
  pub fn is_valid(self) -> bool { !matches!(self, Self::Invalid) }
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Whether `stored` is an unsalted hex SHA-256 digest.
pub fn is_legacy_hash(stored: &str) -> bool {
  stored.len() == 64 && stored.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn verify_password(password: &str, stored: &str) -> Verification {
  if is_legacy_hash(stored) {
    let digest = hex::encode(Sha256::digest(password.as_bytes()));
    return if digest.eq_ignore_ascii_case(stored) {
      Verification::ValidLegacy
    } else {
      Verification::Invalid
    };
  }

  let Ok(parsed) = PasswordHash::new(stored) else {
    return Verification::Invalid;
  };
  match Argon2::default().verify_password(password.as_bytes(), &parsed) {
    Ok(()) => Verification::Valid,
    Err(_) => Verification::Invalid,
  }
}

/// Spend one argon2 verification on a throwaway hash, so a lookup miss costs
/// about as much as a wrong password.
pub fn burn_verification(password: &str) {
  static DUMMY: OnceLock<Option<String>> = OnceLock::new();
  if let Some(hash) = DUMMY.get_or_init(|| hash_password("estate-dummy").ok()) {
    let _ = verify_password(password, hash);
  }
}
