//! JSON REST API for GeekTunes.
//!
//! Exposes an axum [`Router`] backed by any
//! [`geektunes_core::store::CatalogStore`]. Handlers hold no state of their
//! own; everything lives in the store, the chat hub or the immutable config.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = geektunes_api::router(AppState::new(store, ApiConfig::default()));
//! axum::serve(listener, app).await?;
//! ```

pub mod artists;
pub mod auth;
pub mod chat;
pub mod error;
pub mod extract;
pub mod notifications;
pub mod projects;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use geektunes_core::store::CatalogStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use chat::{ChatHub, HubEvent};
pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime knobs the handlers need.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Lifetime of a bearer token issued at login or registration.
  pub session_ttl:        chrono::Duration,
  /// Messages returned by `GET /chat/messages` without `?limit=`.
  pub chat_history_limit: usize,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      session_ttl:        chrono::Duration::hours(720),
      chat_history_limit: 50,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub hub:    ChatHub,
  pub config: Arc<ApiConfig>,
}

impl<S> AppState<S> {
  pub fn new(store: S, config: ApiConfig) -> Self {
    Self {
      store:  Arc::new(store),
      hub:    ChatHub::new(chat::HUB_CAPACITY),
      config: Arc::new(config),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      hub:    self.hub.clone(),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the REST API under `/api` plus the
/// `/ws` invalidation channel, with open CORS and request tracing.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + 'static,
{
  let api = Router::new()
    // Artists
    .route("/artists", get(artists::list::<S>).post(artists::create::<S>))
    .route(
      "/artists/{id}",
      get(artists::get_one::<S>)
        .put(artists::update::<S>)
        .delete(artists::deactivate::<S>),
    )
    .route("/artists/role/{role}", get(artists::by_role::<S>))
    .route("/artists/search/{query}", get(artists::search::<S>))
    .route(
      "/artists/{id}/like",
      post(artists::like::<S>).delete(artists::unlike::<S>),
    )
    .route("/admin/artists", get(artists::list_all::<S>))
    .route("/me/likes", get(artists::my_likes::<S>))
    // Projects
    .route("/projects", get(projects::list::<S>).post(projects::create::<S>))
    .route(
      "/projects/{id}",
      get(projects::get_one::<S>)
        .put(projects::update::<S>)
        .delete(projects::delete::<S>),
    )
    // Notifications
    .route(
      "/notifications",
      get(notifications::list::<S>).post(notifications::create::<S>),
    )
    .route("/notifications/{id}", axum::routing::delete(notifications::delete::<S>))
    // Accounts
    .route("/register", post(users::register::<S>))
    .route("/login", post(users::login::<S>))
    .route("/logout", post(users::logout::<S>))
    .route("/me", get(users::me::<S>).put(users::update_me::<S>))
    .route("/admin/users", get(users::list::<S>))
    .route("/admin/users/{id}/admin", put(users::set_admin::<S>))
    // Chat
    .route(
      "/chat/messages",
      get(chat::list_messages::<S>).post(chat::post_message::<S>),
    );

  Router::new()
    .nest("/api", api)
    .route("/ws", get(chat::ws_handler::<S>))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
