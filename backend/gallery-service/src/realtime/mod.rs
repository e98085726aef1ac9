//! Live update fan-out.
//!
//! One shared channel: every connected websocket client receives every event.
//! Delivery is fire-and-forget with no replay for late joiners; clients
//! re-fetch the content listing on (re)connect.

mod session;

pub use session::WsSession;

use std::sync::Arc;

use actix::prelude::*;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::{Comment, ContentItem, Payment};

/// Event pushed to every connected client.
///
/// Wire shape: `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum RealtimeEvent {
    /// Full updated item list after create/delete.
    ContentUpdated(Vec<ContentItem>),
    CommentAdded {
        #[serde(rename = "itemId")]
        item_id: String,
        comment: Comment,
    },
    LikeUpdated {
        #[serde(rename = "itemId")]
        item_id: String,
        likes: usize,
        #[serde(rename = "likedBy")]
        liked_by: Vec<String>,
    },
    PaymentAdded(Payment),
    PaymentApproved {
        #[serde(rename = "paymentId")]
        payment_id: String,
        username: String,
    },
    PaymentRejected {
        #[serde(rename = "paymentId")]
        payment_id: String,
    },
}

/// Serialized event delivered to a session's mailbox.
#[derive(Clone, Message)]
#[rtype(result = "()")]
pub struct Push(pub String);

/// Registry of connected push-channel sessions.
#[derive(Clone, Default)]
pub struct Broadcaster {
    inner: Arc<RwLock<Vec<Recipient<Push>>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, client: Recipient<Push>) {
        self.inner.write().await.push(client);
    }

    /// Fan an event out to every connected client.
    ///
    /// The event is serialized once; clients whose mailbox is gone are
    /// dropped from the registry.
    pub async fn publish(&self, event: &RealtimeEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize realtime event: {}", e);
                return;
            }
        };
        let mut clients = self.inner.write().await;
        clients.retain(|client| client.try_send(Push(payload.clone())).is_ok());
    }

    pub async fn client_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
