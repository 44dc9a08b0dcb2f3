//! Users and the sessions issued to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A registered account.
///
/// `password` holds the argon2 PHC string and is never serialised, so a
/// `User` can be returned from a handler as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:         String,
  pub username:   String,
  #[serde(skip_serializing, default)]
  pub password:   String,
  pub email:      Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub is_admin:   bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Apply a profile edit in place and bump `updated_at`.
  pub fn apply(&mut self, update: UserUpdate, now: DateTime<Utc>) {
    if let Some(email) = update.email {
      self.email = Some(email);
    }
    if let Some(first_name) = update.first_name {
      self.first_name = Some(first_name);
    }
    if let Some(last_name) = update.last_name {
      self.last_name = Some(last_name);
    }
    self.updated_at = now;
  }
}

/// Input to [`crate::store::CatalogStore::create_user`].
/// The id and timestamps are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
  pub username:   String,
  /// Already-hashed password; stores never see plaintext.
  pub password:   String,
  pub email:      Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
}

impl NewUser {
  pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password_hash.into(),
      ..Default::default()
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.username.trim().is_empty() {
      return Err(Error::invalid("username must not be empty"));
    }
    if self.password.is_empty() {
      return Err(Error::invalid("password must not be empty"));
    }
    Ok(())
  }
}

/// Profile fields a user may change. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
  pub email:      Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
}

/// A server-issued login session. Only the digest of the bearer token is
/// kept; the token itself goes to the client once.
#[derive(Debug, Clone)]
pub struct NewSession {
  pub token_hash: String,
  pub user_id:    String,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}
