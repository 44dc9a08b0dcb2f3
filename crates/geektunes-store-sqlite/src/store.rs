//! [`SqliteStore`], the SQLite implementation of [`CatalogStore`].

use std::{collections::HashSet, path::Path};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use geektunes_core::{
  artist::{Artist, ArtistId, ArtistUpdate, Like, NewArtist, SearchQuery},
  chat::{ChatMessage, validate_content},
  notification::{NewNotification, Notification},
  project::{NewProject, Project, ProjectUpdate, check_collaborators},
  store::CatalogStore,
  user::{NewSession, NewUser, User, UserUpdate},
};

use crate::{
  Error, Result,
  encode::{
    ARTIST_COLUMNS, EncodedArtist, MESSAGE_COLUMNS, NOTIFICATION_COLUMNS, PROJECT_COLUMNS,
    RawArtist, RawMessage, RawNotification, RawProject, RawUser, USER_COLUMNS, decode_dt,
    encode_date, encode_dt, encode_list,
  },
  schema::SCHEMA,
};

/// Which artists a listing query returns.
enum ArtistFilter {
  All,
  Active,
  ActiveWithRole(String),
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A GeekTunes catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_artists(&self, filter: ArtistFilter) -> Result<Vec<Artist>> {
    let raws: Vec<RawArtist> = self
      .conn
      .call(move |conn| {
        let rows = match filter {
          ArtistFilter::All => {
            let mut stmt =
              conn.prepare(&format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id"))?;
            stmt
              .query_map([], RawArtist::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
          ArtistFilter::Active => {
            let mut stmt = conn.prepare(&format!(
              "SELECT {ARTIST_COLUMNS} FROM artists WHERE is_active = 1 ORDER BY id"
            ))?;
            stmt
              .query_map([], RawArtist::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
          ArtistFilter::ActiveWithRole(role) => {
            // json_each compares with `=`, which is exact and case-sensitive.
            let mut stmt = conn.prepare(&format!(
              "SELECT {ARTIST_COLUMNS} FROM artists
               WHERE is_active = 1
                 AND EXISTS (SELECT 1 FROM json_each(artists.roles) WHERE json_each.value = ?1)
               ORDER BY id"
            ))?;
            stmt
              .query_map(rusqlite::params![role], RawArtist::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArtist::into_artist).collect()
  }

  /// Overwrite every mutable column of `artist`'s row.
  async fn write_artist(&self, artist: &Artist) -> Result<()> {
    let encoded = EncodedArtist::new(artist)?;
    let id          = artist.id;
    let name        = artist.name.clone();
    let avatar      = artist.avatar.clone();
    let description = artist.description.clone();
    let music_url   = artist.music_url.clone();
    let is_active   = artist.is_active;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE artists SET
             name = ?2, avatar = ?3, description = ?4, roles = ?5, social_links = ?6,
             music_url = ?7, is_active = ?8, musical_styles = ?9, artist_types = ?10
           WHERE id = ?1",
          rusqlite::params![
            id,
            name,
            avatar,
            description,
            encoded.roles,
            encoded.social_links,
            music_url,
            is_active,
            encoded.musical_styles,
            encoded.artist_types,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_project(&self, project: &Project) -> Result<()> {
    let id                = project.id;
    let name              = project.name.clone();
    let cover_image       = project.cover_image.clone();
    let description       = project.description.clone();
    let genres            = encode_list(&project.genres)?;
    let collaborators     = encode_list(&project.collaborators)?;
    let preview_audio_url = project.preview_audio_url.clone();
    let preview_video_url = project.preview_video_url.clone();
    let status            = project.status.as_ref().to_owned();
    let release_date      = project.release_date.map(encode_date);
    let is_active         = project.is_active;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE projects SET
             name = ?2, cover_image = ?3, description = ?4, genres = ?5,
             collaborators = ?6, preview_audio_url = ?7, preview_video_url = ?8,
             status = ?9, release_date = ?10, is_active = ?11
           WHERE id = ?1",
          rusqlite::params![
            id,
            name,
            cover_image,
            description,
            genres,
            collaborators,
            preview_audio_url,
            preview_video_url,
            status,
            release_date,
            is_active,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn artist_ids(&self) -> Result<HashSet<ArtistId>> {
    let ids = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id FROM artists")?;
        let ids = stmt
          .query_map([], |row| row.get::<_, ArtistId>(0))?
          .collect::<rusqlite::Result<HashSet<_>>>()?;
        Ok(ids)
      })
      .await?;
    Ok(ids)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn get_user(&self, id: &str) -> Result<Option<User>> {
    let id = id.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
              rusqlite::params![id],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
    let username = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
              rusqlite::params![username],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn create_user(&self, input: NewUser) -> Result<User> {
    input.validate()?;

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

    let row = user.clone();
    let at_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             id, username, password, email, first_name, last_name,
             is_admin, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?7)",
          rusqlite::params![
            row.id,
            row.username,
            row.password,
            row.email,
            row.first_name,
            row.last_name,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| Error::or_duplicate(e, || format!("username {:?} is already taken", user.username)))?;

    Ok(user)
  }

  async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
    let Some(mut user) = self.get_user(id).await? else {
      return Ok(None);
    };
    user.apply(update, Utc::now());

    let row = user.clone();
    let at_str = encode_dt(user.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET email = ?2, first_name = ?3, last_name = ?4, updated_at = ?5
           WHERE id = ?1",
          rusqlite::params![row.id, row.email, row.first_name, row.last_name, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(user))
  }

  async fn set_admin(&self, id: &str, is_admin: bool) -> Result<Option<User>> {
    let id_owned = id.to_owned();
    let at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET is_admin = ?2, updated_at = ?3 WHERE id = ?1",
          rusqlite::params![id_owned, is_admin, at_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get_user(id).await
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn create_session(&self, session: NewSession) -> Result<()> {
    let created_str = encode_dt(session.created_at);
    let expires_str = encode_dt(session.expires_at);

    let purged = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let purged = tx.execute(
          "DELETE FROM sessions WHERE expires_at <= ?1",
          rusqlite::params![created_str],
        )?;
        tx.execute(
          "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![session.token_hash, session.user_id, created_str, expires_str],
        )?;
        tx.commit()?;
        Ok(purged)
      })
      .await?;

    if purged > 0 {
      tracing::debug!(purged, "expired sessions removed");
    }
    Ok(())
  }

  async fn get_session_user(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>> {
    let token_hash = token_hash.to_owned();

    let found: Option<(RawUser, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT u.id, u.username, u.password, u.email, u.first_name, u.last_name,
                      u.is_admin, u.created_at, u.updated_at, s.expires_at
               FROM sessions s
               JOIN users u ON u.id = s.user_id
               WHERE s.token_hash = ?1",
              rusqlite::params![token_hash],
              |row| Ok((RawUser::from_row(row)?, row.get(9)?)),
            )
            .optional()?,
        )
      })
      .await?;

    let Some((raw, expires_at)) = found else {
      return Ok(None);
    };
    if decode_dt(&expires_at)? <= now {
      return Ok(None);
    }
    raw.into_user().map(Some)
  }

  async fn delete_session(&self, token_hash: &str) -> Result<bool> {
    let token_hash = token_hash.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM sessions WHERE token_hash = ?1",
          rusqlite::params![token_hash],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  // ── Artists ───────────────────────────────────────────────────────────────

  async fn get_all_artists(&self) -> Result<Vec<Artist>> {
    self.select_artists(ArtistFilter::Active).await
  }

  async fn get_all_artists_including_inactive(&self) -> Result<Vec<Artist>> {
    self.select_artists(ArtistFilter::All).await
  }

  async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
    let raw: Option<RawArtist> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?1"),
              rusqlite::params![id],
              RawArtist::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawArtist::into_artist).transpose()
  }

  async fn get_artists_by_role(&self, role: &str) -> Result<Vec<Artist>> {
    self
      .select_artists(ArtistFilter::ActiveWithRole(role.to_owned()))
      .await
  }

  async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
    // SQLite's LIKE only folds ASCII case; names here are often accented,
    // so matching happens on decoded rows.
    let query = SearchQuery::parse(query)?;
    let mut artists = self.select_artists(ArtistFilter::Active).await?;
    artists.retain(|a| query.matches(a));
    Ok(artists)
  }

  async fn create_artist(&self, input: NewArtist) -> Result<Artist> {
    input.validate()?;

    let mut artist = Artist::from_new(0, input);
    let encoded     = EncodedArtist::new(&artist)?;
    let name        = artist.name.clone();
    let avatar      = artist.avatar.clone();
    let description = artist.description.clone();
    let music_url   = artist.music_url.clone();
    let is_active   = artist.is_active;

    artist.id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO artists (
             name, avatar, description, roles, social_links,
             music_url, is_active, musical_styles, artist_types, likes
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0)",
          rusqlite::params![
            name,
            avatar,
            description,
            encoded.roles,
            encoded.social_links,
            music_url,
            is_active,
            encoded.musical_styles,
            encoded.artist_types,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(artist)
  }

  async fn update_artist(&self, id: ArtistId, update: ArtistUpdate) -> Result<Option<Artist>> {
    let Some(mut artist) = self.get_artist(id).await? else {
      return Ok(None);
    };
    artist.apply(update)?;
    self.write_artist(&artist).await?;
    Ok(Some(artist))
  }

  async fn deactivate_artist(&self, id: ArtistId) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE artists SET is_active = 0 WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Likes ─────────────────────────────────────────────────────────────────

  async fn like_artist(&self, user_id: &str, artist_id: ArtistId) -> Result<Option<Like>> {
    if self.get_user(user_id).await?.is_none() {
      return Err(geektunes_core::Error::invalid(format!("unknown user {user_id}")).into());
    }
    let user_id = user_id.to_owned();
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let uid = user_id.clone();

    let like_id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let active: Option<bool> = tx
          .query_row(
            "SELECT is_active FROM artists WHERE id = ?1",
            rusqlite::params![artist_id],
            |row| row.get(0),
          )
          .optional()?;
        if active != Some(true) {
          return Ok(None);
        }

        tx.execute(
          "INSERT INTO likes (user_id, artist_id, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![uid, artist_id, at_str],
        )?;
        let like_id = tx.last_insert_rowid();
        tx.execute(
          "UPDATE artists SET likes = likes + 1 WHERE id = ?1",
          rusqlite::params![artist_id],
        )?;
        tx.commit()?;
        Ok(Some(like_id))
      })
      .await
      .map_err(|e| {
        Error::or_duplicate(e, || format!("artist {artist_id} is already liked by this user"))
      })?;

    Ok(like_id.map(|id| Like { id, user_id, artist_id, created_at }))
  }

  async fn unlike_artist(&self, user_id: &str, artist_id: ArtistId) -> Result<bool> {
    let user_id = user_id.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let removed = tx.execute(
          "DELETE FROM likes WHERE user_id = ?1 AND artist_id = ?2",
          rusqlite::params![user_id, artist_id],
        )?;
        if removed > 0 {
          tx.execute(
            "UPDATE artists SET likes = MAX(likes - 1, 0) WHERE id = ?1",
            rusqlite::params![artist_id],
          )?;
        }
        tx.commit()?;
        Ok(removed > 0)
      })
      .await?;
    Ok(removed)
  }

  async fn liked_artist_ids(&self, user_id: &str) -> Result<Vec<ArtistId>> {
    let user_id = user_id.to_owned();

    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT artist_id FROM likes WHERE user_id = ?1 ORDER BY id")?;
        let ids = stmt
          .query_map(rusqlite::params![user_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<ArtistId>>>()?;
        Ok(ids)
      })
      .await?;
    Ok(ids)
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn list_projects(&self) -> Result<Vec<Project>> {
    let raws: Vec<RawProject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects WHERE is_active = 1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawProject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  async fn get_project(&self, id: i64) -> Result<Option<Project>> {
    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
              rusqlite::params![id],
              RawProject::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProject::into_project).transpose()
  }

  async fn create_project(&self, input: NewProject) -> Result<Project> {
    input.validate()?;
    let known = self.artist_ids().await?;
    check_collaborators(&input.collaborators, |id| known.contains(&id))?;

    let mut project = Project::from_new(0, input, Utc::now());
    let name              = project.name.clone();
    let cover_image       = project.cover_image.clone();
    let description       = project.description.clone();
    let genres            = encode_list(&project.genres)?;
    let collaborators     = encode_list(&project.collaborators)?;
    let preview_audio_url = project.preview_audio_url.clone();
    let preview_video_url = project.preview_video_url.clone();
    let status            = project.status.as_ref().to_owned();
    let release_date      = project.release_date.map(encode_date);
    let created_at        = encode_dt(project.created_at);
    let is_active         = project.is_active;

    project.id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO projects (
             name, cover_image, description, genres, collaborators,
             preview_audio_url, preview_video_url, status, release_date,
             created_at, is_active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            name,
            cover_image,
            description,
            genres,
            collaborators,
            preview_audio_url,
            preview_video_url,
            status,
            release_date,
            created_at,
            is_active,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(project)
  }

  async fn update_project(&self, id: i64, update: ProjectUpdate) -> Result<Option<Project>> {
    let Some(mut project) = self.get_project(id).await? else {
      return Ok(None);
    };
    if let Some(collaborators) = &update.collaborators {
      let known = self.artist_ids().await?;
      check_collaborators(collaborators, |id| known.contains(&id))?;
    }
    project.apply(update)?;
    self.write_project(&project).await?;
    Ok(Some(project))
  }

  async fn delete_project(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM projects WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(removed > 0)
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn list_notifications(&self) -> Result<Vec<Notification>> {
    let raws: Vec<RawNotification> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTIFICATION_COLUMNS} FROM notifications
           WHERE is_active = 1
           ORDER BY id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawNotification::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawNotification::into_notification)
      .collect()
  }

  async fn create_notification(&self, input: NewNotification) -> Result<Notification> {
    input.validate()?;

    let mut notification = Notification::from_new(0, input, Utc::now());
    let title     = notification.title.clone();
    let message   = notification.message.clone();
    let kind      = notification.kind.as_ref().to_owned();
    let is_active = notification.is_active;
    let at_str    = encode_dt(notification.created_at);

    notification.id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notifications (title, message, kind, is_active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![title, message, kind, is_active, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(notification)
  }

  async fn delete_notification(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM notifications WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(removed > 0)
  }

  // ── Chat ──────────────────────────────────────────────────────────────────

  async fn list_messages(&self, limit: usize) -> Result<Vec<ChatMessage>> {
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MESSAGE_COLUMNS} FROM (
             SELECT {MESSAGE_COLUMNS} FROM chat_messages ORDER BY id DESC LIMIT ?1
           ) ORDER BY id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], RawMessage::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }

  async fn create_message(&self, user_id: &str, content: &str) -> Result<ChatMessage> {
    let content = validate_content(content)?;
    let author = self.get_user(user_id).await?.ok_or_else(|| {
      geektunes_core::Error::invalid(format!("unknown user {user_id}"))
    })?;

    let mut message = ChatMessage {
      id: 0,
      user_id: author.id,
      username: author.username,
      content,
      created_at: Utc::now(),
    };

    let row = message.clone();
    let at_str = encode_dt(message.created_at);

    message.id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO chat_messages (user_id, username, content, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.user_id, row.username, row.content, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id = message.id, user = %message.username, "chat message stored");
    Ok(message)
  }
}
