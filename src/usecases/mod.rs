//! Application use cases. Orchestrate domain logic via ports.

pub mod directory_service;
pub mod lookup_service;
pub mod unread_service;

pub use directory_service::DirectoryService;
pub use lookup_service::{EMOTICON_IMAGE_CAP, LookupService};
pub use unread_service::UnreadService;
