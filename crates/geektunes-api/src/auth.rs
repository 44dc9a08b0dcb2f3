//! Password hashing, bearer tokens and the authenticated-user extractors.
//!
//! A token is 32 random bytes, hex-encoded, handed to the client once. The
//! store only ever sees its SHA-256 digest.

use std::sync::LazyLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{header, request::Parts},
};
use chrono::Utc;
use geektunes_core::{
  store::CatalogStore,
  user::{NewSession, User},
};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{
  AppState,
  error::{ApiError, store_err},
};

const TOKEN_BYTES: usize = 32;

/// Verified against when the username is unknown, so a failed login costs
/// the same whether or not the account exists.
static DUMMY_HASH: LazyLock<Option<String>> =
  LazyLock::new(|| hash_password("geektunes-timing-equaliser").ok());

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash `plain` into an argon2 PHC string with a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(plain.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}").into()))
}

pub fn verify_password(plain: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(plain.as_bytes(), &parsed)
    .is_ok()
}

/// Check a login attempt. `user` is `None` for an unknown username; a dummy
/// verification still runs in that case.
pub fn check_login(user: Option<User>, plain: &str) -> Result<User, ApiError> {
  match user {
    Some(user) if verify_password(plain, &user.password) => Ok(user),
    Some(_) => Err(invalid_credentials()),
    None => {
      if let Some(dummy) = DUMMY_HASH.as_deref() {
        verify_password(plain, dummy);
      }
      Err(invalid_credentials())
    }
  }
}

fn invalid_credentials() -> ApiError {
  ApiError::Unauthorized("invalid username or password".into())
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

pub fn new_token() -> String {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

pub fn token_digest(token: &str) -> String { hex::encode(Sha256::digest(token.as_bytes())) }

/// Open a session for `user` and return the plaintext token.
pub async fn issue_session<S: CatalogStore>(
  state: &AppState<S>,
  user: &User,
) -> Result<String, ApiError> {
  let token = new_token();
  let now = Utc::now();
  state
    .store
    .create_session(NewSession {
      token_hash: token_digest(&token),
      user_id:    user.id.clone(),
      created_at: now,
      expires_at: now + state.config.session_ttl,
    })
    .await
    .map_err(store_err)?;
  tracing::info!(user = %user.username, "session issued");
  Ok(token)
}

fn bearer_token(parts: &Parts) -> Option<&str> {
  parts
    .headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// The user behind a valid, unexpired bearer token.
pub struct CurrentUser {
  pub user:       User,
  /// Digest of the presented token, for logout.
  pub token_hash: String,
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: CatalogStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(parts)
      .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
    let token_hash = token_digest(token);

    let user = state
      .store
      .get_session_user(&token_hash, Utc::now())
      .await
      .map_err(store_err)?
      .ok_or_else(|| ApiError::Unauthorized("invalid or expired token".into()))?;

    Ok(CurrentUser { user, token_hash })
  }
}

/// A [`CurrentUser`] with `isAdmin` set.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<AppState<S>> for AdminUser
where
  S: CatalogStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;
    if !user.is_admin {
      return Err(ApiError::Unauthorized("admin privileges required".into()));
    }
    Ok(AdminUser(user))
  }
}

#[cfg(test)]
mod tests {
  use axum::http::Request;
  use geektunes_core::{memory::MemStore, user::NewUser};

  use super::*;
  use crate::ApiConfig;

  async fn extract(
    auth: Option<&str>,
    state: &AppState<MemStore>,
  ) -> Result<CurrentUser, ApiError> {
    let mut builder = Request::builder();
    if let Some(value) = auth {
      builder = builder.header(header::AUTHORIZATION, value);
    }
    let (mut parts, _) = builder.body(()).unwrap().into_parts();
    CurrentUser::from_request_parts(&mut parts, state).await
  }

  #[test]
  fn password_round_trip() {
    let phc = hash_password("hunter2").unwrap();
    assert!(phc.starts_with("$argon2"));
    assert!(verify_password("hunter2", &phc));
    assert!(!verify_password("hunter3", &phc));
    assert!(!verify_password("hunter2", "not a phc string"));
  }

  #[test]
  fn tokens_are_random_hex() {
    let a = new_token();
    assert_eq!(a.len(), TOKEN_BYTES * 2);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, new_token());
    assert_eq!(token_digest(&a), token_digest(&a));
    assert_ne!(token_digest(&a), a);
  }

  #[test]
  fn login_failures_look_alike() {
    let phc = hash_password("secret").unwrap();
    let user = User {
      password: phc,
      ..serde_json::from_value::<User>(serde_json::json!({
        "id": "u1", "username": "demo", "isAdmin": false,
        "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
      }))
      .unwrap()
    };

    let wrong = check_login(Some(user.clone()), "nope").unwrap_err().to_string();
    let unknown = check_login(None, "nope").unwrap_err().to_string();
    assert_eq!(wrong, unknown);
    assert_eq!(check_login(Some(user), "secret").unwrap().username, "demo");
  }

  #[tokio::test]
  async fn bearer_resolves_to_user() {
    let state = AppState::new(MemStore::new(), ApiConfig::default());
    let user = state
      .store
      .create_user(NewUser::new("demo", "hash"))
      .await
      .unwrap();
    let token = issue_session(&state, &user).await.unwrap();

    let current = extract(Some(&format!("Bearer {token}")), &state).await.unwrap();
    assert_eq!(current.user.id, user.id);
    assert_eq!(current.token_hash, token_digest(&token));

    assert!(matches!(extract(None, &state).await, Err(ApiError::Unauthorized(_))));
    assert!(matches!(
      extract(Some("Bearer nope"), &state).await,
      Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
      extract(Some(&format!("Basic {token}")), &state).await,
      Err(ApiError::Unauthorized(_))
    ));
  }

  #[tokio::test]
  async fn expired_session_rejected() {
    let config = ApiConfig { session_ttl: chrono::Duration::seconds(-1), ..Default::default() };
    let state = AppState::new(MemStore::new(), config);
    let user = state
      .store
      .create_user(NewUser::new("demo", "hash"))
      .await
      .unwrap();
    let token = issue_session(&state, &user).await.unwrap();
    assert!(extract(Some(&format!("Bearer {token}")), &state).await.is_err());
  }
}
