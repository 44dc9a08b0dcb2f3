//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends ([`crate::memory::MemStore`],
//! `geektunes-store-sqlite`). The API layer depends on this abstraction, never
//! on a concrete backend, and never reaches the data any other way.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  artist::{Artist, ArtistId, ArtistUpdate, Like, NewArtist},
  chat::ChatMessage,
  notification::{NewNotification, Notification},
  project::{NewProject, Project, ProjectUpdate},
  user::{NewSession, NewUser, User, UserUpdate},
};

/// Abstraction over a catalog backend.
///
/// A missing record is a normal outcome (`Ok(None)` / `Ok(false)`), never an
/// error. Errors are reserved for invalid input, uniqueness violations and
/// backing-store failures, and every backend error converts into
/// [`crate::Error`] so callers map them uniformly.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  fn get_user<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn get_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Persist a new user under a fresh id. Fails with a duplicate-key error
  /// if the username is taken; the check and the insert are atomic.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn update_user<'a>(
    &'a self,
    id: &'a str,
    update: UserUpdate,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn set_admin<'a>(
    &'a self,
    id: &'a str,
    is_admin: bool,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// All users in creation order.
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Store a new session and drop every session already expired at its
  /// `created_at`.
  fn create_session(
    &self,
    session: NewSession,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Resolve a token digest to its user if the session has not expired by
  /// `now`.
  fn get_session_user<'a>(
    &'a self,
    token_hash: &'a str,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn delete_session<'a>(
    &'a self,
    token_hash: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Artists ───────────────────────────────────────────────────────────

  /// Active artists in insertion order.
  fn get_all_artists(&self) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  /// Every artist, active or not, in insertion order. Admin listing.
  fn get_all_artists_including_inactive(
    &self,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  /// A single artist regardless of its active flag.
  fn get_artist(
    &self,
    id: ArtistId,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + '_;

  /// Active artists whose roles contain `role` exactly (case-sensitive).
  fn get_artists_by_role<'a>(
    &'a self,
    role: &'a str,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + 'a;

  /// Active artists whose name, description or any role contains `query`,
  /// ignoring case. A blank query is an invalid-argument error.
  fn search_artists<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + 'a;

  fn create_artist(
    &self,
    input: NewArtist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn update_artist(
    &self,
    id: ArtistId,
    update: ArtistUpdate,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + '_;

  /// Soft delete: clear the active flag. Returns `false` if no such artist.
  fn deactivate_artist(
    &self,
    id: ArtistId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Likes ─────────────────────────────────────────────────────────────

  /// Record a like and bump the artist's counter. `None` if the artist does
  /// not exist or is inactive; a duplicate-key error if already liked; an
  /// invalid-argument error if `user_id` names no user.
  fn like_artist<'a>(
    &'a self,
    user_id: &'a str,
    artist_id: ArtistId,
  ) -> impl Future<Output = Result<Option<Like>, Self::Error>> + Send + 'a;

  /// Remove a like and decrement the counter. `false` if there was none.
  fn unlike_artist<'a>(
    &'a self,
    user_id: &'a str,
    artist_id: ArtistId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn liked_artist_ids<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<ArtistId>, Self::Error>> + Send + 'a;

  // ── Projects ──────────────────────────────────────────────────────────

  /// Active projects in insertion order.
  fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  fn get_project(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// Collaborators must all be existing artist ids.
  fn create_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn update_project(
    &self,
    id: i64,
    update: ProjectUpdate,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  fn delete_project(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  /// Active notifications, newest first.
  fn list_notifications(
    &self,
  ) -> impl Future<Output = Result<Vec<Notification>, Self::Error>> + Send + '_;

  fn create_notification(
    &self,
    input: NewNotification,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + '_;

  fn delete_notification(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Chat ──────────────────────────────────────────────────────────────

  /// The most recent `limit` messages, oldest first.
  fn list_messages(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<ChatMessage>, Self::Error>> + Send + '_;

  /// Store a message from `user_id`. Content is trimmed and bounded by
  /// [`crate::chat::validate_content`]; the author must exist.
  fn create_message<'a>(
    &'a self,
    user_id: &'a str,
    content: &'a str,
  ) -> impl Future<Output = Result<ChatMessage, Self::Error>> + Send + 'a;
}
