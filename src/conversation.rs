//! Chat conversation store.
//!
//! Sends are optimistic: the user message is appended before the request
//! goes out. Overlapping sends are not serialized, so assistant replies land
//! in the order their requests resolve, not the order they were submitted.

use crate::api::ApiClient;
use crate::store::{InFlight, MessageLog};
use crate::types::{ChatMessage, Role};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

pub const CHAT_ERROR_TEXT: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Conversation handle passed explicitly to every view that needs it.
#[derive(Clone)]
pub struct ConversationService {
    api: ApiClient,
    log: MessageLog<ChatMessage>,
    pending_query: Arc<Mutex<Option<String>>>,
}

impl ConversationService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            log: MessageLog::new(),
            pending_query: Arc::new(Mutex::new(None)),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.log.is_busy()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.log.subscribe()
    }

    /// Hand a query to whichever chat view mounts next. Overwrites any
    /// query that has not been consumed yet.
    pub fn set_pending_query(&self, query: impl Into<String>) {
        let mut slot = self
            .pending_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(query.into());
    }

    /// Read-and-clear, so one value is sent at most once.
    pub fn take_pending_query(&self) -> Option<String> {
        self.pending_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Synchronous half of a send: append the user message and mark busy.
    /// Returns `None` for blank input, in which case nothing happened.
    pub fn begin(&self, query: &str) -> Option<PendingSend> {
        if query.trim().is_empty() {
            return None;
        }
        self.log
            .append_with(Role::User, query.to_string(), |message| message);
        let in_flight = self.log.start_request();
        Some(PendingSend {
            api: self.api.clone(),
            log: self.log.clone(),
            query: query.to_string(),
            in_flight,
        })
    }

    pub async fn send(&self, query: &str) {
        if let Some(pending) = self.begin(query) {
            pending.resolve().await;
        }
    }
}

impl PartialEq for ConversationService {
    fn eq(&self, other: &Self) -> bool {
        self.log.ptr_eq(&other.log)
    }
}

/// A user message that is waiting for its assistant reply.
///
/// Dropping it unresolved releases the busy flag without appending anything.
pub struct PendingSend {
    api: ApiClient,
    log: MessageLog<ChatMessage>,
    query: String,
    in_flight: InFlight<ChatMessage>,
}

impl PendingSend {
    pub async fn resolve(self) {
        let text = match self.api.ask_ai(&self.query).await {
            Ok(reply) => render_answer(&reply.response),
            Err(err) => {
                tracing::error!(error = %err, "error sending message");
                CHAT_ERROR_TEXT.to_string()
            }
        };
        self.log
            .append_with(Role::Assistant, text, |message| message);
        self.in_flight.release();
    }
}

/// Pretty-printed JSON of the raw answer payload.
pub fn render_answer(response: &Value) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
}
