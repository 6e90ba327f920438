//! In-memory session store: conversations live for the process lifetime.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gamechat_core::error::SessionError;
use gamechat_core::message::Conversation;
use gamechat_core::session::{SessionId, SessionStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::info;

/// Maximum number of sessions kept before the least recently used is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

struct SessionEntry {
    conversation: Conversation,
    last_used: DateTime<Utc>,
}

/// A `HashMap`-backed session store.
///
/// Writes to one session never touch another. When full, storing a new
/// session evicts the one that was written least recently.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    max_sessions: usize,
    evictions: AtomicU64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            evictions: AtomicU64::new(0),
        }
    }

    /// Number of sessions currently stored.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Sessions dropped to make room since the store was created.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get(&self, id: &SessionId) -> Result<Conversation, SessionError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .map(|entry| entry.conversation.clone())
            .unwrap_or_default())
    }

    async fn put(&self, id: &SessionId, conversation: Conversation) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;

        // Evict least recently used session if at capacity
        if sessions.len() >= self.max_sessions && !sessions.contains_key(id) {
            if let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(k, _)| k.clone())
            {
                sessions.remove(&oldest);
                let total = self.evictions.fetch_add(1, Ordering::Relaxed) + 1;
                info!(
                    session = %oldest,
                    capacity = self.max_sessions,
                    evictions = total,
                    "Session store full, evicted least recently used conversation"
                );
            }
        }

        sessions.insert(
            id.clone(),
            SessionEntry {
                conversation,
                last_used: Utc::now(),
            },
        );
        Ok(())
    }

    async fn clear(&self, id: &SessionId) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}
