//! Append-only message log shared by the chat and visualization stores.

use crate::types::{ChatMessage, Role};
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;
use tokio::sync::watch;

/// Bound for values stored in a [`MessageLog`]. Entries are built around a
/// [`ChatMessage`] by [`MessageLog::append_with`].
pub trait LogEntry: Clone + Send + 'static {}

impl LogEntry for ChatMessage {}

struct LogState<M> {
    next_id: u64,
    entries: Vec<M>,
    in_flight: usize,
}

/// Message log with in-flight accounting.
///
/// Ids come from a per-log counter and increase with creation order.
/// Every mutation bumps a revision published over a watch channel so a view
/// can re-render when a detached request lands.
pub struct MessageLog<M> {
    state: Arc<Mutex<LogState<M>>>,
    revision: Arc<watch::Sender<u64>>,
}

impl<M> Clone for MessageLog<M> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<M: LogEntry> MessageLog<M> {
    pub fn new() -> Self {
        let (revision, _rx) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(LogState {
                next_id: 1,
                entries: Vec::new(),
                in_flight: 0,
            })),
            revision: Arc::new(revision),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LogState<M>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Build a message with the next id and append whatever `wrap` makes of it.
    pub fn append_with(&self, role: Role, text: String, wrap: impl FnOnce(ChatMessage) -> M) -> u64 {
        let id = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.entries.push(wrap(ChatMessage {
                id,
                role,
                text,
                created_at: OffsetDateTime::now_utc(),
            }));
            id
        };
        self.bump();
        id
    }

    pub fn snapshot(&self) -> Vec<M> {
        self.lock().entries.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().in_flight > 0
    }

    /// Mark one request as outstanding. The guard releases it on drop.
    pub fn start_request(&self) -> InFlight<M> {
        self.lock().in_flight += 1;
        self.bump();
        InFlight {
            log: self.clone(),
            released: false,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl<M: LogEntry> Default for MessageLog<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// One outstanding request against a [`MessageLog`].
pub struct InFlight<M: LogEntry> {
    log: MessageLog<M>,
    released: bool,
}

impl<M: LogEntry> InFlight<M> {
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        {
            let mut state = self.log.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.log.bump();
    }
}

impl<M: LogEntry> Drop for InFlight<M> {
    fn drop(&mut self) {
        self.release_inner();
    }
}
