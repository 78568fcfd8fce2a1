//! Cross-cutting concerns: configuration.

pub mod config;

pub use config::{AppConfig, Settings};
