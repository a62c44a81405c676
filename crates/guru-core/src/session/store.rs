//! In-memory session store.
//!
//! Holds every live `DiagnosticSession` for the process. Persistence
//! and eviction are collaborator concerns; the store only guarantees a
//! concurrency-safe map with exactly one session instance per id.

use super::model::DiagnosticSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A shared handle to one mutable session.
///
/// The orchestrator is the single writer; the lock exists so that
/// read-only callers (e.g. a routing layer serving `getSession`) can
/// snapshot concurrently with other sessions' stage calls.
pub type SessionHandle = Arc<RwLock<DiagnosticSession>>;

/// Concurrency-safe mapping from session id to session.
///
/// Distinct sessions are fully independent and may be driven
/// concurrently; stage calls for one session id must be serialized by
/// the caller.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new session for the user/domain pair and registers it.
    ///
    /// Session ids are UUIDv4; they carry no semantics.
    pub async fn create(&self, user_id: &str, domain: &str) -> SessionHandle {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(RwLock::new(DiagnosticSession::new(&id, user_id, domain)));

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session.clone());
        session
    }

    /// Looks up a session by id.
    pub async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Lists the session ids owned by a user.
    pub async fn list_for_user(&self, user_id: &str) -> Vec<String> {
        let sessions = self.sessions.read().await;
        let mut ids = Vec::new();
        for (id, handle) in sessions.iter() {
            if handle.read().await.user_id == user_id {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_registers_unique_ids() {
        let store = SessionStore::new();
        let a = store.create("u1", "python").await;
        let b = store.create("u1", "python").await;
        assert_ne!(a.read().await.id, b.read().await.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_returns_the_same_instance() {
        let store = SessionStore::new();
        let created = store.create("u1", "car_repair").await;
        let id = created.read().await.id.clone();

        let fetched = store.get(&id).await.unwrap();
        assert!(Arc::ptr_eq(&created, &fetched));
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_list_for_user_filters_by_owner() {
        let store = SessionStore::new();
        store.create("alice", "python").await;
        store.create("bob", "python").await;
        let alice = store.list_for_user("alice").await;
        assert_eq!(alice.len(), 1);
    }
}
