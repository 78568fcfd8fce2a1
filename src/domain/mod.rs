//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    ChatMessage, Conversation, ConversationKind, Directory, DirectoryEntry, Emoticon, RoomPrivacy,
    RoomSummary, UnreadBlock, UnreadState, UserSummary,
};
pub use errors::DomainError;
