//! Single-shot lookups: room detail and emoticon preview. No caching.

use crate::domain::{DomainError, Emoticon, RoomSummary};
use crate::ports::ChatGateway;
use std::sync::Arc;
use tracing::debug;

/// Hard ceiling on emoticon image downloads, in bytes.
pub const EMOTICON_IMAGE_CAP: u64 = 1_000_000;

/// Lookup service for the `room` and `emoticon` subcommands.
pub struct LookupService {
    gateway: Arc<dyn ChatGateway>,
}

impl LookupService {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch one room by name or numeric id.
    pub async fn room(&self, name_or_id: &str) -> Result<RoomSummary, DomainError> {
        self.gateway.get_room(name_or_id).await
    }

    /// Fetch emoticon metadata plus its image bytes. The download is capped;
    /// an oversize image fails the whole command.
    pub async fn emoticon(&self, shortcut: &str) -> Result<(Emoticon, Vec<u8>), DomainError> {
        let emoticon = self.gateway.get_emoticon(shortcut).await?;
        debug!(shortcut = %emoticon.shortcut, url = %emoticon.url, "fetching emoticon image");
        let image = self
            .gateway
            .fetch_image(&emoticon.url, EMOTICON_IMAGE_CAP)
            .await?;
        Ok((emoticon, image))
    }
}
