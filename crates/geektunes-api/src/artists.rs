//! Handlers for `/artists` endpoints and artist likes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/artists` | Active artists |
//! | `GET`    | `/artists/{id}` | Any artist; 400 for a non-integer id |
//! | `GET`    | `/artists/role/{role}` | Exact, case-sensitive role match |
//! | `GET`    | `/artists/search/{query}` | 400 for a blank query |
//! | `POST`   | `/artists` | Admin |
//! | `PUT`    | `/artists/{id}` | Admin, partial update |
//! | `DELETE` | `/artists/{id}` | Admin, soft delete |
//! | `GET`    | `/admin/artists` | Admin, includes inactive |
//! | `POST`   | `/artists/{id}/like` | User; returns the artist |
//! | `DELETE` | `/artists/{id}/like` | User; returns the artist |
//! | `GET`    | `/me/likes` | User; liked artist ids |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use geektunes_core::{
  artist::{Artist, ArtistId, ArtistUpdate, NewArtist},
  store::CatalogStore,
};

use crate::{
  AppState,
  auth::{AdminUser, CurrentUser},
  error::{ApiError, store_err},
  extract::{ApiJson, ApiPath},
};

fn not_found(id: ArtistId) -> ApiError { ApiError::NotFound(format!("artist {id} not found")) }

// ─── Public reads ─────────────────────────────────────────────────────────────

/// `GET /artists`
pub async fn list<S: CatalogStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Artist>>, ApiError> {
  let artists = state.store.get_all_artists().await.map_err(store_err)?;
  Ok(Json(artists))
}

/// `GET /artists/{id}`
pub async fn get_one<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<ArtistId>,
) -> Result<Json<Artist>, ApiError> {
  let artist = state
    .store
    .get_artist(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(artist))
}

/// `GET /artists/role/{role}`
pub async fn by_role<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiPath(role): ApiPath<String>,
) -> Result<Json<Vec<Artist>>, ApiError> {
  if role.trim().is_empty() {
    return Err(ApiError::BadRequest("role must not be empty".into()));
  }
  let artists = state
    .store
    .get_artists_by_role(&role)
    .await
    .map_err(store_err)?;
  Ok(Json(artists))
}

/// `GET /artists/search/{query}`
pub async fn search<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiPath(query): ApiPath<String>,
) -> Result<Json<Vec<Artist>>, ApiError> {
  let artists = state
    .store
    .search_artists(&query)
    .await
    .map_err(store_err)?;
  Ok(Json(artists))
}

// ─── Admin ────────────────────────────────────────────────────────────────────

/// `GET /admin/artists`
pub async fn list_all<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
) -> Result<Json<Vec<Artist>>, ApiError> {
  let artists = state
    .store
    .get_all_artists_including_inactive()
    .await
    .map_err(store_err)?;
  Ok(Json(artists))
}

/// `POST /artists`
pub async fn create<S: CatalogStore>(
  State(state): State<AppState<S>>,
  AdminUser(admin): AdminUser,
  ApiJson(body): ApiJson<NewArtist>,
) -> Result<impl IntoResponse, ApiError> {
  let artist = state.store.create_artist(body).await.map_err(store_err)?;
  tracing::info!(id = artist.id, name = %artist.name, by = %admin.username, "artist created");
  Ok((StatusCode::CREATED, Json(artist)))
}

/// `PUT /artists/{id}`
pub async fn update<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
  ApiPath(id): ApiPath<ArtistId>,
  ApiJson(body): ApiJson<ArtistUpdate>,
) -> Result<Json<Artist>, ApiError> {
  let artist = state
    .store
    .update_artist(id, body)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(artist))
}

/// `DELETE /artists/{id}`
pub async fn deactivate<S: CatalogStore>(
  State(state): State<AppState<S>>,
  AdminUser(admin): AdminUser,
  ApiPath(id): ApiPath<ArtistId>,
) -> Result<StatusCode, ApiError> {
  if !state.store.deactivate_artist(id).await.map_err(store_err)? {
    return Err(not_found(id));
  }
  tracing::info!(id, by = %admin.username, "artist deactivated");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Likes ────────────────────────────────────────────────────────────────────

/// `POST /artists/{id}/like`
pub async fn like<S: CatalogStore>(
  State(state): State<AppState<S>>,
  current: CurrentUser,
  ApiPath(id): ApiPath<ArtistId>,
) -> Result<Json<Artist>, ApiError> {
  state
    .store
    .like_artist(&current.user.id, id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  reload(&state, id).await
}

/// `DELETE /artists/{id}/like`
pub async fn unlike<S: CatalogStore>(
  State(state): State<AppState<S>>,
  current: CurrentUser,
  ApiPath(id): ApiPath<ArtistId>,
) -> Result<Json<Artist>, ApiError> {
  let removed = state
    .store
    .unlike_artist(&current.user.id, id)
    .await
    .map_err(store_err)?;
  if !removed {
    return Err(ApiError::NotFound(format!("artist {id} is not liked")));
  }
  reload(&state, id).await
}

/// `GET /me/likes`
pub async fn my_likes<S: CatalogStore>(
  State(state): State<AppState<S>>,
  current: CurrentUser,
) -> Result<Json<Vec<ArtistId>>, ApiError> {
  let ids = state
    .store
    .liked_artist_ids(&current.user.id)
    .await
    .map_err(store_err)?;
  Ok(Json(ids))
}

async fn reload<S: CatalogStore>(state: &AppState<S>, id: ArtistId) -> Result<Json<Artist>, ApiError> {
  let artist = state
    .store
    .get_artist(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(artist))
}
