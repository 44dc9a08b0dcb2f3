//! Handlers for `/notifications` endpoints.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use geektunes_core::{
  notification::{NewNotification, Notification},
  store::CatalogStore,
};

use crate::{
  AppState,
  auth::AdminUser,
  chat::HubEvent,
  error::{ApiError, store_err},
  extract::{ApiJson, ApiPath},
};

/// `GET /notifications` — active only, newest first.
pub async fn list<S: CatalogStore>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Notification>>, ApiError> {
  let notifications = state.store.list_notifications().await.map_err(store_err)?;
  Ok(Json(notifications))
}

/// `POST /notifications` — also pings `/ws` subscribers.
pub async fn create<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
  ApiJson(body): ApiJson<NewNotification>,
) -> Result<impl IntoResponse, ApiError> {
  let notification = state
    .store
    .create_notification(body)
    .await
    .map_err(store_err)?;
  if notification.is_active {
    state.hub.publish(HubEvent::NewNotification);
  }
  Ok((StatusCode::CREATED, Json(notification)))
}

/// `DELETE /notifications/{id}`
pub async fn delete<S: CatalogStore>(
  State(state): State<AppState<S>>,
  _admin: AdminUser,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
  if !state.store.delete_notification(id).await.map_err(store_err)? {
    return Err(ApiError::NotFound(format!("notification {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
