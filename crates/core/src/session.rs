//! Session store trait: per-client conversation storage.
//!
//! Sessions are keyed by an opaque token whose lifecycle belongs to the
//! transport layer. The core only reads a conversation, works on a copy,
//! and writes it back when a turn succeeds.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::SessionError;
use crate::message::Conversation;

/// Opaque identifier for one client session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Mint a fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage for conversations, one per session.
///
/// Implementations: in-memory (default). Unknown sessions read as empty.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Fetch the conversation for a session (empty if unknown).
    async fn get(&self, id: &SessionId) -> Result<Conversation, SessionError>;

    /// Replace the conversation for a session.
    async fn put(&self, id: &SessionId, conversation: Conversation) -> Result<(), SessionError>;

    /// Drop the conversation for a session. Clearing an unknown session is a no-op.
    async fn clear(&self, id: &SessionId) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_display() {
        let id = SessionId::from("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }
}
