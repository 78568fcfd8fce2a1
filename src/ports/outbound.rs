//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    ChatMessage, Conversation, Directory, DomainError, Emoticon, RoomSummary, UnreadState,
    UserSummary,
};

/// HipChat REST gateway. One request per call; no retries, no backoff.
#[async_trait::async_trait]
pub trait ChatGateway: Send + Sync {
    /// List every room, expanded, up to the fixed page ceiling.
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, DomainError>;

    /// List every user, expanded, up to the fixed page ceiling.
    async fn list_users(&self) -> Result<Vec<UserSummary>, DomainError>;

    /// Fetch a single room by name or numeric id.
    async fn get_room(&self, name_or_id: &str) -> Result<RoomSummary, DomainError>;

    /// List per-conversation read states with unread counts expanded.
    async fn read_states(&self) -> Result<Vec<UnreadState>, DomainError>;

    /// Fetch history for a conversation, from the `not_before` message id
    /// forward (the server includes the marker message itself).
    async fn recent_history(
        &self,
        conversation: Conversation,
        not_before: &str,
    ) -> Result<Vec<ChatMessage>, DomainError>;

    /// Fetch emoticon metadata by shortcut.
    async fn get_emoticon(&self, shortcut: &str) -> Result<Emoticon, DomainError>;

    /// Download an image, failing once `cap` bytes is exceeded. Checked
    /// against the declared Content-Length and the bytes actually received.
    async fn fetch_image(&self, url: &str, cap: u64) -> Result<Vec<u8>, DomainError>;
}

/// Directory snapshot persistence. Read or written at most once per run.
#[async_trait::async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Load the persisted snapshot. `None` when the file is absent,
    /// unreadable, or unparseable: a whole-directory cache miss, never an
    /// error.
    async fn load(&self) -> Option<Directory>;

    /// Persist a snapshot, creating the parent directory if needed.
    async fn save(&self, directory: &Directory) -> Result<(), DomainError>;
}
