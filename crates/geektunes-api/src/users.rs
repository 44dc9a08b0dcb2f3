//! Account endpoints: registration, login, logout, the caller's own profile,
//! and the admin user list.

use axum::{Json, extract::State, http::StatusCode};
use geektunes_core::{
  store::CatalogStore,
  user::{NewUser, User, UserUpdate},
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{self, AdminUser, CurrentUser},
  error::{ApiError, store_err},
  extract::{ApiJson, ApiPath},
};

/// Returned by register and login. `user` never carries the password hash.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
  pub user:  User,
  pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterBody {
  pub username:   String,
  pub password:   String,
  pub email:      Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
  pub username: String,
  pub password: String,
}

fn require_credentials(username: &str, password: &str) -> Result<(), ApiError> {
  if username.trim().is_empty() || password.is_empty() {
    return Err(ApiError::BadRequest("username and password are required".into()));
  }
  Ok(())
}

// ─── Sessions ─────────────────────────────────────────────────────────────────

/// `POST /register`
pub async fn register<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<RegisterBody>,
) -> Result<Json<AuthResponse>, ApiError> {
  require_credentials(&body.username, &body.password)?;

  let input = NewUser {
    username:   body.username.trim().to_owned(),
    password:   auth::hash_password(&body.password)?,
    email:      body.email,
    first_name: body.first_name,
    last_name:  body.last_name,
  };
  let user = state.store.create_user(input).await.map_err(store_err)?;
  tracing::info!(user = %user.username, "user registered");

  let token = auth::issue_session(&state, &user).await?;
  Ok(Json(AuthResponse { user, token }))
}

/// `POST /login`
pub async fn login<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
  require_credentials(&body.username, &body.password)?;

  let found = state
    .store
    .get_user_by_username(body.username.trim())
    .await
    .map_err(store_err)?;
  let user = auth::check_login(found, &body.password).inspect_err(|_| {
    tracing::warn!(username = %body.username, "failed login");
  })?;

  let token = auth::issue_session(&state, &user).await?;
  Ok(Json(AuthResponse { user, token }))
}

/// `POST /logout` — revokes the presented token only.
pub async fn logout<S: CatalogStore>(
  State(state): State<AppState<S>>,
  current: CurrentUser,
) -> Result<StatusCode, ApiError> {
  state
    .store
    .delete_session(&current.token_hash)
    .await
    .map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Profile ──────────────────────────────────────────────────────────────────

/// `GET /me`
pub async fn me<S: CatalogStore>(current: CurrentUser) -> Json<User> { Json(current.user) }

/// `PUT /me`
pub async fn update_me<S: CatalogStore>(
  State(state): State<AppState<S>>,
  current: CurrentUser,
  ApiJson(body): ApiJson<UserUpdate>,
) -> Result<Json<User>, ApiError> {
  let user = state
    .store
    .update_user(&current.user.id, body)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
  Ok(Json(user))
}

// ─── Admin ────────────────────────────────────────────────────────────────────

/// `GET /admin/users`
pub async fn list<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
) -> Result<Json<Vec<User>>, ApiError> {
  let users = state.store.list_users().await.map_err(store_err)?;
  Ok(Json(users))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminBody {
  pub is_admin: bool,
}

/// `PUT /admin/users/{id}/admin`
pub async fn set_admin<S: CatalogStore>(
  State(state): State<AppState<S>>,
  AdminUser(admin): AdminUser,
  ApiPath(id): ApiPath<String>,
  ApiJson(body): ApiJson<SetAdminBody>,
) -> Result<Json<User>, ApiError> {
  let user = state
    .store
    .set_admin(&id, body.is_admin)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  tracing::info!(user = %user.username, is_admin = user.is_admin, by = %admin.username, "admin flag changed");
  Ok(Json(user))
}
