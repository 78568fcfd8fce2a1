//! Persistence adapters.

pub mod directory_json;

pub use directory_json::DirectoryJson;
