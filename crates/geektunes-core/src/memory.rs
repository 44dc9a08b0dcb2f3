//! [`MemStore`], the in-memory implementation of [`CatalogStore`].
//!
//! Every table sits behind one `RwLock`, so each operation is atomic with
//! respect to the others. Lookups are linear scans; the catalog is small.

use std::{
  collections::{BTreeMap, HashMap},
  sync::Arc,
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
  Error, Result,
  artist::{Artist, ArtistId, ArtistUpdate, Like, NewArtist, SearchQuery},
  chat::{ChatMessage, validate_content},
  notification::{NewNotification, Notification},
  project::{NewProject, Project, ProjectUpdate, check_collaborators},
  store::CatalogStore,
  user::{NewSession, NewUser, User, UserUpdate},
};

#[derive(Default)]
struct Tables {
  users:         Vec<User>,
  sessions:      HashMap<String, NewSession>,
  // Ids only ever grow, so key order is insertion order.
  artists:       BTreeMap<ArtistId, Artist>,
  likes:         Vec<Like>,
  projects:      BTreeMap<i64, Project>,
  notifications: Vec<Notification>,
  messages:      Vec<ChatMessage>,
  last_id:       LastIds,
}

#[derive(Default)]
struct LastIds {
  artist:       i64,
  like:         i64,
  project:      i64,
  notification: i64,
  message:      i64,
}

fn next(counter: &mut i64) -> i64 {
  *counter += 1;
  *counter
}

/// A catalog held entirely in process memory.
///
/// Cloning is cheap and clones share the same tables. Each
/// `MemStore::default()` starts empty, so tests get isolated state.
#[derive(Clone, Default)]
pub struct MemStore {
  tables: Arc<RwLock<Tables>>,
}

impl MemStore {
  pub fn new() -> Self { Self::default() }
}

impl CatalogStore for MemStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn get_user(&self, id: &str) -> Result<Option<User>> {
    Ok(self.tables.read().users.iter().find(|u| u.id == id).cloned())
  }

  async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
    Ok(
      self
        .tables
        .read()
        .users
        .iter()
        .find(|u| u.username == username)
        .cloned(),
    )
  }

  async fn create_user(&self, input: NewUser) -> Result<User> {
    input.validate()?;
    let mut tables = self.tables.write();
    if tables.users.iter().any(|u| u.username == input.username) {
      return Err(Error::DuplicateKey(format!(
        "username {:?} is already taken",
        input.username
      )));
    }

    let now = Utc::now();
    let user = User {
      id:         Uuid::new_v4().to_string(),
      username:   input.username,
      password:   input.password,
      email:      input.email,
      first_name: input.first_name,
      last_name:  input.last_name,
      is_admin:   false,
      created_at: now,
      updated_at: now,
    };
    tables.users.push(user.clone());
    Ok(user)
  }

  async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
    let mut tables = self.tables.write();
    Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
      user.apply(update, Utc::now());
      user.clone()
    }))
  }

  async fn set_admin(&self, id: &str, is_admin: bool) -> Result<Option<User>> {
    let mut tables = self.tables.write();
    Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
      user.is_admin = is_admin;
      user.updated_at = Utc::now();
      user.clone()
    }))
  }

  async fn list_users(&self) -> Result<Vec<User>> { Ok(self.tables.read().users.clone()) }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn create_session(&self, session: NewSession) -> Result<()> {
    let mut tables = self.tables.write();
    tables
      .sessions
      .retain(|_, s| s.expires_at > session.created_at);
    tables.sessions.insert(session.token_hash.clone(), session);
    Ok(())
  }

  async fn get_session_user(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>> {
    let tables = self.tables.read();
    let Some(session) = tables.sessions.get(token_hash) else {
      return Ok(None);
    };
    if session.expires_at <= now {
      return Ok(None);
    }
    Ok(tables.users.iter().find(|u| u.id == session.user_id).cloned())
  }

  async fn delete_session(&self, token_hash: &str) -> Result<bool> {
    Ok(self.tables.write().sessions.remove(token_hash).is_some())
  }

  // ── Artists ───────────────────────────────────────────────────────────────

  async fn get_all_artists(&self) -> Result<Vec<Artist>> {
    Ok(
      self
        .tables
        .read()
        .artists
        .values()
        .filter(|a| a.is_active)
        .cloned()
        .collect(),
    )
  }

  async fn get_all_artists_including_inactive(&self) -> Result<Vec<Artist>> {
    Ok(self.tables.read().artists.values().cloned().collect())
  }

  async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
    Ok(self.tables.read().artists.get(&id).cloned())
  }

  async fn get_artists_by_role(&self, role: &str) -> Result<Vec<Artist>> {
    Ok(
      self
        .tables
        .read()
        .artists
        .values()
        .filter(|a| a.is_active && a.has_role(role))
        .cloned()
        .collect(),
    )
  }

  async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
    let query = SearchQuery::parse(query)?;
    Ok(
      self
        .tables
        .read()
        .artists
        .values()
        .filter(|a| query.matches(a))
        .cloned()
        .collect(),
    )
  }

  async fn create_artist(&self, input: NewArtist) -> Result<Artist> {
    input.validate()?;
    let mut tables = self.tables.write();
    let id = next(&mut tables.last_id.artist);
    let artist = Artist::from_new(id, input);
    tables.artists.insert(id, artist.clone());
    Ok(artist)
  }

  async fn update_artist(&self, id: ArtistId, update: ArtistUpdate) -> Result<Option<Artist>> {
    let mut tables = self.tables.write();
    let Some(stored) = tables.artists.get_mut(&id) else {
      return Ok(None);
    };
    let mut edited = stored.clone();
    edited.apply(update)?;
    *stored = edited.clone();
    Ok(Some(edited))
  }

  async fn deactivate_artist(&self, id: ArtistId) -> Result<bool> {
    let mut tables = self.tables.write();
    Ok(
      tables
        .artists
        .get_mut(&id)
        .map(|a| a.is_active = false)
        .is_some(),
    )
  }

  // ── Likes ─────────────────────────────────────────────────────────────────

  async fn like_artist(&self, user_id: &str, artist_id: ArtistId) -> Result<Option<Like>> {
    let mut tables = self.tables.write();
    if !tables.users.iter().any(|u| u.id == user_id) {
      return Err(Error::invalid(format!("unknown user {user_id}")));
    }
    if !tables.artists.get(&artist_id).is_some_and(|a| a.is_active) {
      return Ok(None);
    }
    if tables
      .likes
      .iter()
      .any(|l| l.user_id == user_id && l.artist_id == artist_id)
    {
      return Err(Error::DuplicateKey(format!(
        "artist {artist_id} is already liked by this user"
      )));
    }

    let like = Like {
      id: next(&mut tables.last_id.like),
      user_id: user_id.to_owned(),
      artist_id,
      created_at: Utc::now(),
    };
    tables.likes.push(like.clone());
    if let Some(artist) = tables.artists.get_mut(&artist_id) {
      artist.likes += 1;
    }
    Ok(Some(like))
  }

  async fn unlike_artist(&self, user_id: &str, artist_id: ArtistId) -> Result<bool> {
    let mut tables = self.tables.write();
    let Some(pos) = tables
      .likes
      .iter()
      .position(|l| l.user_id == user_id && l.artist_id == artist_id)
    else {
      return Ok(false);
    };
    tables.likes.remove(pos);
    if let Some(artist) = tables.artists.get_mut(&artist_id) {
      artist.likes = (artist.likes - 1).max(0);
    }
    Ok(true)
  }

  async fn liked_artist_ids(&self, user_id: &str) -> Result<Vec<ArtistId>> {
    Ok(
      self
        .tables
        .read()
        .likes
        .iter()
        .filter(|l| l.user_id == user_id)
        .map(|l| l.artist_id)
        .collect(),
    )
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn list_projects(&self) -> Result<Vec<Project>> {
    Ok(
      self
        .tables
        .read()
        .projects
        .values()
        .filter(|p| p.is_active)
        .cloned()
        .collect(),
    )
  }

  async fn get_project(&self, id: i64) -> Result<Option<Project>> {
    Ok(self.tables.read().projects.get(&id).cloned())
  }

  async fn create_project(&self, input: NewProject) -> Result<Project> {
    input.validate()?;
    let mut tables = self.tables.write();
    check_collaborators(&input.collaborators, |id| tables.artists.contains_key(&id))?;
    let id = next(&mut tables.last_id.project);
    let project = Project::from_new(id, input, Utc::now());
    tables.projects.insert(id, project.clone());
    Ok(project)
  }

  async fn update_project(&self, id: i64, update: ProjectUpdate) -> Result<Option<Project>> {
    let mut tables = self.tables.write();
    if let Some(collaborators) = &update.collaborators {
      check_collaborators(collaborators, |id| tables.artists.contains_key(&id))?;
    }
    let Some(stored) = tables.projects.get_mut(&id) else {
      return Ok(None);
    };
    let mut edited = stored.clone();
    edited.apply(update)?;
    *stored = edited.clone();
    Ok(Some(edited))
  }

  async fn delete_project(&self, id: i64) -> Result<bool> {
    Ok(self.tables.write().projects.remove(&id).is_some())
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn list_notifications(&self) -> Result<Vec<Notification>> {
    Ok(
      self
        .tables
        .read()
        .notifications
        .iter()
        .rev()
        .filter(|n| n.is_active)
        .cloned()
        .collect(),
    )
  }

  async fn create_notification(&self, input: NewNotification) -> Result<Notification> {
    input.validate()?;
    let mut tables = self.tables.write();
    let id = next(&mut tables.last_id.notification);
    let notification = Notification::from_new(id, input, Utc::now());
    tables.notifications.push(notification.clone());
    Ok(notification)
  }

  async fn delete_notification(&self, id: i64) -> Result<bool> {
    let mut tables = self.tables.write();
    let before = tables.notifications.len();
    tables.notifications.retain(|n| n.id != id);
    Ok(tables.notifications.len() != before)
  }

  // ── Chat ──────────────────────────────────────────────────────────────────

  async fn list_messages(&self, limit: usize) -> Result<Vec<ChatMessage>> {
    let tables = self.tables.read();
    let start = tables.messages.len().saturating_sub(limit);
    Ok(tables.messages[start..].to_vec())
  }

  async fn create_message(&self, user_id: &str, content: &str) -> Result<ChatMessage> {
    let content = validate_content(content)?;
    let mut tables = self.tables.write();
    let username = tables
      .users
      .iter()
      .find(|u| u.id == user_id)
      .map(|u| u.username.clone())
      .ok_or_else(|| Error::invalid(format!("unknown user {user_id}")))?;

    let message = ChatMessage {
      id: next(&mut tables.last_id.message),
      user_id: user_id.to_owned(),
      username,
      content,
      created_at: Utc::now(),
    };
    tables.messages.push(message.clone());
    Ok(message)
  }
}
