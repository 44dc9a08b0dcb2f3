//! Handlers for `/projects` endpoints. Reads are public, writes need an
//! admin token.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use geektunes_core::{
  project::{NewProject, Project, ProjectUpdate},
  store::CatalogStore,
};

use crate::{
  AppState,
  auth::AdminUser,
  error::{ApiError, store_err},
  extract::{ApiJson, ApiPath},
};

fn not_found(id: i64) -> ApiError { ApiError::NotFound(format!("project {id} not found")) }

/// `GET /projects`
pub async fn list<S: CatalogStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Project>>, ApiError> {
  let projects = state.store.list_projects().await.map_err(store_err)?;
  Ok(Json(projects))
}

/// `GET /projects/{id}`
pub async fn get_one<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<Project>, ApiError> {
  let project = state
    .store
    .get_project(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(project))
}

/// `POST /projects`
pub async fn create<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
  ApiJson(body): ApiJson<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
  let project = state.store.create_project(body).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(project)))
}

/// `PUT /projects/{id}`
pub async fn update<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<ProjectUpdate>,
) -> Result<Json<Project>, ApiError> {
  let project = state
    .store
    .update_project(id, body)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(project))
}

/// `DELETE /projects/{id}` — hard delete.
pub async fn delete<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
  if !state.store.delete_project(id).await.map_err(store_err)? {
    return Err(not_found(id));
  }
  Ok(StatusCode::NO_CONTENT)
}
