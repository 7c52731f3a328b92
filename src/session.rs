use crate::types::Session;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared, in-memory session cell.
///
/// Clearing it is the client-wide reset: every subscriber sees `None` and
/// drops whatever state belonged to the old session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn establish(&self, session: Session) {
        tracing::info!(session_id = %session.session_id, "session established");
        self.tx.send_replace(Some(session));
    }

    pub fn clear(&self) {
        if self.tx.send_replace(None).is_some() {
            tracing::info!("session cleared");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_session() -> Session {
        Session {
            session_id: "9999999999".to_string(),
            phone_number: "9999999999".to_string(),
        }
    }

    #[test]
    fn test_establish_and_clear() {
        let handle = SessionHandle::new();
        assert!(!handle.is_active());

        handle.establish(demo_session());
        assert_eq!(handle.current(), Some(demo_session()));

        handle.clear();
        assert!(handle.current().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_clear() {
        let handle = SessionHandle::new();
        handle.establish(demo_session());
        let mut rx = handle.subscribe();

        let other = handle.clone();
        other.clear();

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
