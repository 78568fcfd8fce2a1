//! Port traits. API boundaries for the hexagon.
//!
//! Outbound only: the application calls into infrastructure. Command
//! dispatch is plain clap in `main`, so there is no inbound port.

pub mod outbound;

pub use outbound::{ChatGateway, DirectoryStore};
