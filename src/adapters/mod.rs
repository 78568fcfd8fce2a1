//! Infrastructure adapters. Implement outbound ports.
//!
//! HipChat REST, filesystem, terminal output. Map errors to DomainError.

pub mod hipchat;
pub mod persistence;
pub mod ui;
