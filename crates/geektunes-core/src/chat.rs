//! Chat room messages. Delivery to live clients is a separate concern; the
//! store only keeps history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
  pub id:         i64,
  pub user_id:    String,
  /// Denormalised at write time so history renders without a user lookup.
  pub username:   String,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// Trim and bound-check message content.
pub fn validate_content(content: &str) -> Result<String> {
  let trimmed = content.trim();
  if trimmed.is_empty() {
    return Err(Error::invalid("message must not be empty"));
  }
  if trimmed.chars().count() > MAX_MESSAGE_CHARS {
    return Err(Error::invalid(format!(
      "message exceeds {MAX_MESSAGE_CHARS} characters"
    )));
  }
  Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn content_is_trimmed() {
    assert_eq!(validate_content("  oi  ").unwrap(), "oi");
  }

  #[test]
  fn blank_and_oversized_rejected() {
    assert!(validate_content(" \n ").is_err());
    let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
    assert!(validate_content(&long).is_err());
    assert!(validate_content(&"a".repeat(MAX_MESSAGE_CHARS)).is_ok());
  }
}
