//! Broadcast notifications shown to every visitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{Error, Result};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
  #[default]
  Info,
  Success,
  Warning,
  Error,
  System,
  Mention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub id:         i64,
  pub title:      String,
  pub message:    String,
  #[serde(rename = "type")]
  pub kind:       NotificationKind,
  pub is_active:  bool,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
  pub title:     String,
  pub message:   String,
  #[serde(rename = "type", default)]
  pub kind:      NotificationKind,
  pub is_active: Option<bool>,
}

impl NewNotification {
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::invalid("notification title must not be empty"));
    }
    if self.message.trim().is_empty() {
      return Err(Error::invalid("notification message must not be empty"));
    }
    Ok(())
  }
}

impl Notification {
  pub fn from_new(id: i64, input: NewNotification, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      title: input.title,
      message: input.message,
      kind: input.kind,
      is_active: input.is_active.unwrap_or(true),
      created_at,
    }
  }
}
