//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as fixed-width RFC 3339 UTC strings, so text
//! comparison in SQL orders them correctly, and release dates as
//! `YYYY-MM-DD`. List and map fields are stored as compact JSON. Enums use
//! their wire names.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use geektunes_core::{
  artist::{Artist, ArtistId},
  chat::ChatMessage,
  notification::{Notification, NotificationKind},
  project::{Project, ProjectStatus},
  user::User,
};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_list<T: serde::Serialize>(items: &[T]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_list<T: serde::de::DeserializeOwned>(s: &str) -> Result<Vec<T>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_links(links: &BTreeMap<String, String>) -> Result<String> {
  Ok(serde_json::to_string(links)?)
}

pub fn decode_links(s: &str) -> Result<BTreeMap<String, String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_status(s: &str) -> Result<ProjectStatus> {
  ProjectStatus::from_str(s).map_err(|_| Error::UnknownVariant {
    column: "projects.status",
    value:  s.to_owned(),
  })
}

pub fn decode_kind(s: &str) -> Result<NotificationKind> {
  NotificationKind::from_str(s).map_err(|_| Error::UnknownVariant {
    column: "notifications.kind",
    value:  s.to_owned(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str =
  "id, username, password, email, first_name, last_name, is_admin, created_at, updated_at";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:         String,
  pub username:   String,
  pub password:   String,
  pub email:      Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub is_admin:   bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  /// Expects the columns in [`USER_COLUMNS`] order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      username:   row.get(1)?,
      password:   row.get(2)?,
      email:      row.get(3)?,
      first_name: row.get(4)?,
      last_name:  row.get(5)?,
      is_admin:   row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:         self.id,
      username:   self.username,
      password:   self.password,
      email:      self.email,
      first_name: self.first_name,
      last_name:  self.last_name,
      is_admin:   self.is_admin,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const ARTIST_COLUMNS: &str = "id, name, avatar, description, roles, social_links, \
                                  music_url, is_active, musical_styles, artist_types, likes";

/// Raw values read directly from an `artists` row.
pub struct RawArtist {
  pub id:             ArtistId,
  pub name:           String,
  pub avatar:         String,
  pub description:    String,
  pub roles:          String,
  pub social_links:   String,
  pub music_url:      Option<String>,
  pub is_active:      bool,
  pub musical_styles: String,
  pub artist_types:   String,
  pub likes:          i64,
}

impl RawArtist {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      name:           row.get(1)?,
      avatar:         row.get(2)?,
      description:    row.get(3)?,
      roles:          row.get(4)?,
      social_links:   row.get(5)?,
      music_url:      row.get(6)?,
      is_active:      row.get(7)?,
      musical_styles: row.get(8)?,
      artist_types:   row.get(9)?,
      likes:          row.get(10)?,
    })
  }

  pub fn into_artist(self) -> Result<Artist> {
    Ok(Artist {
      id:             self.id,
      name:           self.name,
      avatar:         self.avatar,
      description:    self.description,
      roles:          decode_list(&self.roles)?,
      social_links:   decode_links(&self.social_links)?,
      music_url:      self.music_url,
      is_active:      self.is_active,
      musical_styles: decode_list(&self.musical_styles)?,
      artist_types:   decode_list(&self.artist_types)?,
      likes:          self.likes,
    })
  }
}

/// The JSON-encoded list and map columns of an artist, ready to bind.
pub struct EncodedArtist {
  pub roles:          String,
  pub social_links:   String,
  pub musical_styles: String,
  pub artist_types:   String,
}

impl EncodedArtist {
  pub fn new(artist: &Artist) -> Result<Self> {
    Ok(Self {
      roles:          encode_list(&artist.roles)?,
      social_links:   encode_links(&artist.social_links)?,
      musical_styles: encode_list(&artist.musical_styles)?,
      artist_types:   encode_list(&artist.artist_types)?,
    })
  }
}

pub const PROJECT_COLUMNS: &str = "id, name, cover_image, description, genres, collaborators, \
                                   preview_audio_url, preview_video_url, status, release_date, \
                                   created_at, is_active";

pub struct RawProject {
  pub id:                i64,
  pub name:              String,
  pub cover_image:       String,
  pub description:       String,
  pub genres:            String,
  pub collaborators:     String,
  pub preview_audio_url: Option<String>,
  pub preview_video_url: Option<String>,
  pub status:            String,
  pub release_date:      Option<String>,
  pub created_at:        String,
  pub is_active:         bool,
}

impl RawProject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      cover_image:       row.get(2)?,
      description:       row.get(3)?,
      genres:            row.get(4)?,
      collaborators:     row.get(5)?,
      preview_audio_url: row.get(6)?,
      preview_video_url: row.get(7)?,
      status:            row.get(8)?,
      release_date:      row.get(9)?,
      created_at:        row.get(10)?,
      is_active:         row.get(11)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      id:                self.id,
      name:              self.name,
      cover_image:       self.cover_image,
      description:       self.description,
      genres:            decode_list(&self.genres)?,
      collaborators:     decode_list(&self.collaborators)?,
      preview_audio_url: self.preview_audio_url,
      preview_video_url: self.preview_video_url,
      status:            decode_status(&self.status)?,
      release_date:      self.release_date.as_deref().map(decode_date).transpose()?,
      created_at:        decode_dt(&self.created_at)?,
      is_active:         self.is_active,
    })
  }
}

pub const NOTIFICATION_COLUMNS: &str = "id, title, message, kind, is_active, created_at";

pub struct RawNotification {
  pub id:         i64,
  pub title:      String,
  pub message:    String,
  pub kind:       String,
  pub is_active:  bool,
  pub created_at: String,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      title:      row.get(1)?,
      message:    row.get(2)?,
      kind:       row.get(3)?,
      is_active:  row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      id:         self.id,
      title:      self.title,
      message:    self.message,
      kind:       decode_kind(&self.kind)?,
      is_active:  self.is_active,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const MESSAGE_COLUMNS: &str = "id, user_id, username, content, created_at";

pub struct RawMessage {
  pub id:         i64,
  pub user_id:    String,
  pub username:   String,
  pub content:    String,
  pub created_at: String,
}

impl RawMessage {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      user_id:    row.get(1)?,
      username:   row.get(2)?,
      content:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_message(self) -> Result<ChatMessage> {
    Ok(ChatMessage {
      id:         self.id,
      user_id:    self.user_id,
      username:   self.username,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
