//! In-memory registry of live conversation sessions.

use souschef_core::ConversationContext;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

/// One session's context behind its own async lock.
pub type SharedContext = Arc<AsyncMutex<ConversationContext>>;

/// All live sessions, keyed by server-issued id.
///
/// The outer lock guards only the map and is never held across an await.
/// Each session carries its own async lock, so turns within one session are
/// serialized while distinct sessions proceed concurrently.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SharedContext>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a session, creating a fresh one when the id is absent or
    /// unknown. Returns the id actually in use.
    pub fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SharedContext) {
        let mut sessions = self.sessions.lock().unwrap();
        let id = id.unwrap_or_else(Uuid::new_v4);
        let context = sessions.entry(id).or_default().clone();
        (id, context)
    }

    /// Drop a session. Returns false when the id was unknown.
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.lock().unwrap().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_session_gets_fresh_context() {
        let store = SessionStore::new();
        let (id, context) = store.get_or_create(None);
        assert!(context.lock().await.history().is_empty());
        assert_eq!(store.len(), 1);

        // Same id resolves to the same context.
        context.lock().await.record_suggestion("Ramen");
        let (_, again) = store.get_or_create(Some(id));
        assert_eq!(again.lock().await.dish_name(), Some("Ramen"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (first_id, first) = store.get_or_create(None);
        let (second_id, second) = store.get_or_create(None);
        assert_ne!(first_id, second_id);

        first.lock().await.record_suggestion("Ramen");
        assert!(second.lock().await.dish_name().is_none());
    }

    #[test]
    fn test_remove_session() {
        let store = SessionStore::new();
        let (id, _) = store.get_or_create(None);
        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_id_starts_empty_session() {
        let store = SessionStore::new();
        let wanted = Uuid::new_v4();
        let (id, _) = store.get_or_create(Some(wanted));
        assert_eq!(id, wanted);
        assert_eq!(store.len(), 1);
    }
}
