//! HipChat v2 REST adapter: HTTP client plus wire-format DTOs.

pub mod client;
pub mod wire;

pub use client::HipchatGateway;
