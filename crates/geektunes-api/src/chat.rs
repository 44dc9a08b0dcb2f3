//! Chat history endpoints and the `/ws` invalidation channel.
//!
//! The socket never carries data. Each frame is a bare `{"type": ...}`
//! signal telling the client to re-fetch over REST; a subscriber that falls
//! behind simply skips the events it missed.

use axum::{
  Json,
  extract::{
    State,
    ws::{Message, WebSocket, WebSocketUpgrade},
  },
  http::StatusCode,
  response::{IntoResponse, Response},
};
use futures_util::{SinkExt as _, StreamExt as _};
use geektunes_core::{chat::ChatMessage, store::CatalogStore};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
  AppState,
  auth::CurrentUser,
  error::{ApiError, store_err},
  extract::{ApiJson, ApiQuery},
};

/// Events buffered per subscriber before it starts lagging.
pub const HUB_CAPACITY: usize = 64;

/// Upper bound on `?limit=` for history requests.
pub const MAX_HISTORY: usize = 500;

// ─── Hub ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEvent {
  NewMessage,
  NewNotification,
}

/// Fan-out of [`HubEvent`]s to every connected socket.
#[derive(Debug, Clone)]
pub struct ChatHub {
  tx: broadcast::Sender<HubEvent>,
}

impl ChatHub {
  pub fn new(capacity: usize) -> Self {
    let (tx, _) = broadcast::channel(capacity);
    Self { tx }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> { self.tx.subscribe() }

  /// Send to whoever is listening; no subscribers is not an error.
  pub fn publish(&self, event: HubEvent) {
    if let Ok(count) = self.tx.send(event) {
      tracing::debug!(?event, subscribers = count, "hub event published");
    }
  }

  pub fn subscriber_count(&self) -> usize { self.tx.receiver_count() }
}

// ─── History ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
  pub limit: Option<usize>,
}

/// `GET /chat/messages[?limit=N]` — the last N messages, oldest first.
pub async fn list_messages<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ApiQuery(params): ApiQuery<HistoryParams>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
  let limit = params
    .limit
    .unwrap_or(state.config.chat_history_limit)
    .min(MAX_HISTORY);
  let messages = state.store.list_messages(limit).await.map_err(store_err)?;
  Ok(Json(messages))
}

#[derive(Debug, Deserialize)]
pub struct PostMessageBody {
  pub content: String,
}

/// `POST /chat/messages`
pub async fn post_message<S: CatalogStore>(
  State(state): State<AppState<S>>,
  current: CurrentUser,
  ApiJson(body): ApiJson<PostMessageBody>,
) -> Result<impl IntoResponse, ApiError> {
  let message = state
    .store
    .create_message(&current.user.id, &body.content)
    .await
    .map_err(store_err)?;
  state.hub.publish(HubEvent::NewMessage);
  Ok((StatusCode::CREATED, Json(message)))
}

// ─── WebSocket ────────────────────────────────────────────────────────────────

/// `GET /ws`
pub async fn ws_handler<S: CatalogStore>(
  State(state): State<AppState<S>>,
  ws: WebSocketUpgrade,
) -> Response {
  let rx = state.hub.subscribe();
  ws.on_upgrade(move |socket| forward_events(socket, rx))
}

async fn forward_events(socket: WebSocket, mut rx: broadcast::Receiver<HubEvent>) {
  let (mut outgoing, mut incoming) = socket.split();
  tracing::debug!("ws subscriber connected");

  loop {
    tokio::select! {
      event = rx.recv() => match event {
        Ok(event) => {
          let Ok(frame) = serde_json::to_string(&event) else { continue };
          if outgoing.send(Message::Text(frame.into())).await.is_err() {
            break;
          }
        }
        Err(RecvError::Lagged(skipped)) => {
          tracing::debug!(skipped, "ws subscriber lagged");
        }
        Err(RecvError::Closed) => break,
      },
      frame = incoming.next() => match frame {
        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
        Some(Ok(_)) => {}
      },
    }
  }

  tracing::debug!("ws subscriber disconnected");
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn frames_are_type_only() {
    assert_eq!(
      serde_json::to_string(&HubEvent::NewMessage).unwrap(),
      r#"{"type":"new_message"}"#
    );
    assert_eq!(
      serde_json::to_string(&HubEvent::NewNotification).unwrap(),
      r#"{"type":"new_notification"}"#
    );
  }

  #[tokio::test]
  async fn hub_fans_out_and_tolerates_no_subscribers() {
    let hub = ChatHub::new(4);
    hub.publish(HubEvent::NewMessage);

    let mut a = hub.subscribe();
    let mut b = hub.subscribe();
    assert_eq!(hub.subscriber_count(), 2);
    hub.publish(HubEvent::NewNotification);
    assert_eq!(a.recv().await.unwrap(), HubEvent::NewNotification);
    assert_eq!(b.recv().await.unwrap(), HubEvent::NewNotification);
  }

  #[tokio::test]
  async fn slow_subscriber_lags_instead_of_blocking() {
    let hub = ChatHub::new(2);
    let mut rx = hub.subscribe();
    for _ in 0..5 {
      hub.publish(HubEvent::NewMessage);
    }
    assert!(matches!(rx.recv().await, Err(RecvError::Lagged(_))));
    assert_eq!(rx.recv().await.unwrap(), HubEvent::NewMessage);
  }
}
