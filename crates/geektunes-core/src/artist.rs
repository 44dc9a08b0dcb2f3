//! Artist profiles and the query semantics every backend shares.
//!
//! Filtering lives here rather than in each store so that the in-memory and
//! SQLite backends agree on exactly which artists a search returns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub type ArtistId = i64;

/// A performer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
  pub id:             ArtistId,
  pub name:           String,
  pub avatar:         String,
  pub description:    String,
  /// Open vocabulary, e.g. `"cantor"`, `"beatmaker"`.
  pub roles:          Vec<String>,
  /// Platform name → profile URL.
  pub social_links:   BTreeMap<String, String>,
  pub music_url:      Option<String>,
  /// Inactive artists are hidden from every public listing.
  pub is_active:      bool,
  pub musical_styles: Vec<String>,
  pub artist_types:   Vec<String>,
  pub likes:          i64,
}

impl Artist {
  /// Build the stored record for `input` under a freshly assigned id.
  pub fn from_new(id: ArtistId, input: NewArtist) -> Self {
    Self {
      id,
      name: input.name,
      avatar: input.avatar,
      description: input.description,
      roles: input.roles,
      social_links: input.social_links,
      music_url: input.music_url,
      is_active: input.is_active.unwrap_or(true),
      musical_styles: input.musical_styles,
      artist_types: input.artist_types,
      likes: 0,
    }
  }

  /// Exact, case-sensitive role membership.
  pub fn has_role(&self, role: &str) -> bool {
    self.roles.iter().any(|r| r == role)
  }

  /// Case-insensitive substring match over name, description and roles.
  ///
  /// `needle` must already be lowercased (see [`SearchQuery`]).
  pub fn matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.description.to_lowercase().contains(needle)
      || self.roles.iter().any(|r| r.to_lowercase().contains(needle))
  }

  /// Apply a partial admin edit in place.
  pub fn apply(&mut self, update: ArtistUpdate) -> Result<()> {
    if let Some(name) = update.name {
      validate_name(&name)?;
      self.name = name;
    }
    if let Some(avatar) = update.avatar {
      self.avatar = avatar;
    }
    if let Some(description) = update.description {
      self.description = description;
    }
    if let Some(roles) = update.roles {
      self.roles = roles;
    }
    if let Some(social_links) = update.social_links {
      self.social_links = social_links;
    }
    if let Some(music_url) = update.music_url {
      self.music_url = Some(music_url).filter(|u| !u.is_empty());
    }
    if let Some(is_active) = update.is_active {
      self.is_active = is_active;
    }
    if let Some(musical_styles) = update.musical_styles {
      self.musical_styles = musical_styles;
    }
    if let Some(artist_types) = update.artist_types {
      self.artist_types = artist_types;
    }
    Ok(())
  }
}

fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::invalid("artist name must not be empty"));
  }
  Ok(())
}

/// Input to [`crate::store::CatalogStore::create_artist`]. Omitted list
/// fields default to empty; `is_active` defaults to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtist {
  pub name:           String,
  #[serde(default)]
  pub avatar:         String,
  #[serde(default)]
  pub description:    String,
  #[serde(default)]
  pub roles:          Vec<String>,
  #[serde(default)]
  pub social_links:   BTreeMap<String, String>,
  pub music_url:      Option<String>,
  pub is_active:      Option<bool>,
  #[serde(default)]
  pub musical_styles: Vec<String>,
  #[serde(default)]
  pub artist_types:   Vec<String>,
}

impl NewArtist {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Default::default() }
  }

  pub fn validate(&self) -> Result<()> { validate_name(&self.name) }
}

/// Partial edit; `None` leaves a field untouched. An empty `music_url`
/// clears the preview track.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistUpdate {
  pub name:           Option<String>,
  pub avatar:         Option<String>,
  pub description:    Option<String>,
  pub roles:          Option<Vec<String>>,
  pub social_links:   Option<BTreeMap<String, String>>,
  pub music_url:      Option<String>,
  pub is_active:      Option<bool>,
  pub musical_styles: Option<Vec<String>>,
  pub artist_types:   Option<Vec<String>>,
}

/// A validated free-text artist search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  needle: String,
}

impl SearchQuery {
  /// Rejects empty and whitespace-only queries. Matching uses the query as
  /// given, lowercased.
  pub fn parse(raw: &str) -> Result<Self> {
    if raw.trim().is_empty() {
      return Err(Error::invalid("search query must not be empty"));
    }
    Ok(Self { needle: raw.to_lowercase() })
  }

  pub fn needle(&self) -> &str { &self.needle }

  pub fn matches(&self, artist: &Artist) -> bool {
    artist.is_active && artist.matches(&self.needle)
  }
}

/// A user's like of an artist. At most one exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
  pub id:         i64,
  pub user_id:    String,
  pub artist_id:  ArtistId,
  pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn artist(name: &str, description: &str, roles: &[&str]) -> Artist {
    let mut input = NewArtist::named(name);
    input.description = description.into();
    input.roles = roles.iter().map(|r| r.to_string()).collect();
    Artist::from_new(1, input)
  }

  #[test]
  fn defaults_applied_on_create() {
    let a = Artist::from_new(7, NewArtist::named("klzinn"));
    assert_eq!(a.id, 7);
    assert!(a.is_active);
    assert!(a.roles.is_empty());
    assert!(a.social_links.is_empty());
    assert_eq!(a.likes, 0);
  }

  #[test]
  fn role_match_is_exact() {
    let a = artist("klzinn", "", &["cantor", "editor"]);
    assert!(a.has_role("cantor"));
    assert!(!a.has_role("Cantor"));
    assert!(!a.has_role("cant"));
  }

  #[test]
  fn search_covers_name_description_and_roles() {
    let a = artist("Klzinn", "Nerdcore sobre animes", &["Beatmaker"]);
    assert!(SearchQuery::parse("klz").unwrap().matches(&a));
    assert!(SearchQuery::parse("ANIME").unwrap().matches(&a));
    assert!(SearchQuery::parse("beat").unwrap().matches(&a));
    assert!(!SearchQuery::parse("rock").unwrap().matches(&a));
  }

  #[test]
  fn search_skips_inactive() {
    let mut a = artist("klzinn", "", &[]);
    a.is_active = false;
    assert!(!SearchQuery::parse("klz").unwrap().matches(&a));
  }

  #[test]
  fn blank_query_rejected() {
    assert!(matches!(SearchQuery::parse(""), Err(Error::InvalidArgument(_))));
    assert!(matches!(SearchQuery::parse("  \t"), Err(Error::InvalidArgument(_))));
  }

  #[test]
  fn update_rejects_blank_name() {
    let mut a = artist("klzinn", "", &[]);
    let err = a
      .apply(ArtistUpdate { name: Some(" ".into()), ..Default::default() })
      .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(a.name, "klzinn");
  }

  #[test]
  fn update_with_empty_music_url_clears_it() {
    let mut a = artist("klzinn", "", &[]);
    a.music_url = Some("https://cdn.example/preview.mp3".into());
    a.apply(ArtistUpdate { music_url: Some(String::new()), ..Default::default() })
      .unwrap();
    assert_eq!(a.music_url, None);
  }
}
