//! Collaborative releases.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{Error, Result, artist::ArtistId};

/// Release stage. The wire and column names are the product's Portuguese
/// labels.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
pub enum ProjectStatus {
  #[default]
  #[serde(rename = "em_desenvolvimento")]
  #[strum(serialize = "em_desenvolvimento")]
  InDevelopment,
  #[serde(rename = "finalizado")]
  #[strum(serialize = "finalizado")]
  Finished,
  #[serde(rename = "lancado")]
  #[strum(serialize = "lancado")]
  Released,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id:                i64,
  pub name:              String,
  pub cover_image:       String,
  pub description:       String,
  pub genres:            Vec<String>,
  /// Participating artists, always by id.
  pub collaborators:     Vec<ArtistId>,
  pub preview_audio_url: Option<String>,
  pub preview_video_url: Option<String>,
  pub status:            ProjectStatus,
  pub release_date:      Option<NaiveDate>,
  pub created_at:        DateTime<Utc>,
  pub is_active:         bool,
}

impl Project {
  pub fn from_new(id: i64, input: NewProject, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      name: input.name,
      cover_image: input.cover_image,
      description: input.description,
      genres: input.genres,
      collaborators: input.collaborators,
      preview_audio_url: input.preview_audio_url,
      preview_video_url: input.preview_video_url,
      status: input.status,
      release_date: input.release_date,
      created_at,
      is_active: input.is_active.unwrap_or(true),
    }
  }

  pub fn apply(&mut self, update: ProjectUpdate) -> Result<()> {
    if let Some(name) = update.name {
      validate_name(&name)?;
      self.name = name;
    }
    if let Some(cover_image) = update.cover_image {
      self.cover_image = cover_image;
    }
    if let Some(description) = update.description {
      self.description = description;
    }
    if let Some(genres) = update.genres {
      self.genres = genres;
    }
    if let Some(collaborators) = update.collaborators {
      self.collaborators = collaborators;
    }
    if let Some(url) = update.preview_audio_url {
      self.preview_audio_url = Some(url).filter(|u| !u.is_empty());
    }
    if let Some(url) = update.preview_video_url {
      self.preview_video_url = Some(url).filter(|u| !u.is_empty());
    }
    if let Some(status) = update.status {
      self.status = status;
    }
    if let Some(release_date) = update.release_date {
      self.release_date = release_date;
    }
    if let Some(is_active) = update.is_active {
      self.is_active = is_active;
    }
    Ok(())
  }
}

fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::invalid("project name must not be empty"));
  }
  Ok(())
}

/// Check that every collaborator id refers to a known artist.
pub fn check_collaborators(
  collaborators: &[ArtistId],
  exists: impl Fn(ArtistId) -> bool,
) -> Result<()> {
  match collaborators.iter().find(|id| !exists(**id)) {
    Some(id) => Err(Error::invalid(format!("unknown collaborator artist id {id}"))),
    None => Ok(()),
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
  pub name:              String,
  #[serde(default)]
  pub cover_image:       String,
  #[serde(default)]
  pub description:       String,
  #[serde(default)]
  pub genres:            Vec<String>,
  #[serde(default)]
  pub collaborators:     Vec<ArtistId>,
  pub preview_audio_url: Option<String>,
  pub preview_video_url: Option<String>,
  #[serde(default)]
  pub status:            ProjectStatus,
  pub release_date:      Option<NaiveDate>,
  pub is_active:         Option<bool>,
}

impl NewProject {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Default::default() }
  }

  pub fn validate(&self) -> Result<()> { validate_name(&self.name) }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
  pub name:              Option<String>,
  pub cover_image:       Option<String>,
  pub description:       Option<String>,
  pub genres:            Option<Vec<String>>,
  pub collaborators:     Option<Vec<ArtistId>>,
  pub preview_audio_url: Option<String>,
  pub preview_video_url: Option<String>,
  pub status:            Option<ProjectStatus>,
  /// Absent leaves the date alone; `null` clears it.
  #[serde(default, deserialize_with = "present")]
  pub release_date:      Option<Option<NaiveDate>>,
  pub is_active:         Option<bool>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn status_wire_names() {
    assert_eq!(
      serde_json::to_string(&ProjectStatus::InDevelopment).unwrap(),
      "\"em_desenvolvimento\""
    );
    assert_eq!(ProjectStatus::Released.as_ref(), "lancado");
    assert_eq!(ProjectStatus::from_str("finalizado").unwrap(), ProjectStatus::Finished);
    assert!(ProjectStatus::from_str("cancelado").is_err());
  }

  #[test]
  fn unknown_status_rejected_on_input() {
    let err = serde_json::from_str::<NewProject>(r#"{"name":"x","status":"cancelado"}"#);
    assert!(err.is_err());
  }

  #[test]
  fn release_date_kept_set_or_cleared() {
    let mut project = Project::from_new(
      1,
      NewProject { release_date: NaiveDate::from_ymd_opt(2024, 3, 1), ..NewProject::named("x") },
      Utc::now(),
    );

    let untouched: ProjectUpdate = serde_json::from_str(r#"{"name":"y"}"#).unwrap();
    assert_eq!(untouched.release_date, None);
    project.apply(untouched).unwrap();
    assert_eq!(project.release_date, NaiveDate::from_ymd_opt(2024, 3, 1));

    let moved: ProjectUpdate = serde_json::from_str(r#"{"releaseDate":"2024-05-10"}"#).unwrap();
    project.apply(moved).unwrap();
    assert_eq!(project.release_date, NaiveDate::from_ymd_opt(2024, 5, 10));

    let cleared: ProjectUpdate = serde_json::from_str(r#"{"releaseDate":null}"#).unwrap();
    assert_eq!(cleared.release_date, Some(None));
    project.apply(cleared).unwrap();
    assert_eq!(project.release_date, None);
  }

  #[test]
  fn collaborators_checked_against_catalog() {
    let known = [1, 2];
    assert!(check_collaborators(&[1, 2], |id| known.contains(&id)).is_ok());
    let err = check_collaborators(&[1, 9], |id| known.contains(&id)).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(m) if m.contains('9')));
  }
}
