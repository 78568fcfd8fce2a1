//! hipchat-cli: HipChat rooms, unread messages and emoticons from the terminal.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

#[cfg(test)]
mod testutil;
