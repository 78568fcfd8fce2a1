//! Unread aggregation: read states -> resolve -> history -> report blocks.
//!
//! - Directory is loaded (or rebuilt) once, before the read-state fetch
//! - Zero/absent unread counts are skipped without resolution
//! - Unresolved JIDs degrade to a diagnostic block, the run continues
//! - History fetches run sequentially, preserving read-state order

use crate::domain::{ChatMessage, DomainError, UnreadBlock};
use crate::ports::ChatGateway;
use crate::usecases::DirectoryService;
use std::sync::Arc;
use tracing::{debug, warn};

/// Unread service. Produces the report blocks the CLI prints.
pub struct UnreadService {
    gateway: Arc<dyn ChatGateway>,
    directory: Arc<DirectoryService>,
}

impl UnreadService {
    pub fn new(gateway: Arc<dyn ChatGateway>, directory: Arc<DirectoryService>) -> Self {
        Self { gateway, directory }
    }

    /// Collect one block per conversation with unread messages, in the order
    /// the read-state listing reports them. Any gateway failure aborts the
    /// whole run; only an unresolvable JID degrades per-conversation.
    pub async fn collect(&self) -> Result<Vec<UnreadBlock>, DomainError> {
        let directory = self.directory.load_or_rebuild().await?;
        let states = self.gateway.read_states().await?;
        debug!(states = states.len(), "read states fetched");

        let mut blocks = Vec::new();
        for state in states {
            if !state.has_unread() {
                continue;
            }
            let Some(entry) = directory.resolve(&state.jid) else {
                warn!(jid = %state.jid, "read state for a JID missing from the directory");
                blocks.push(UnreadBlock::Unresolved(state));
                continue;
            };

            let messages = self
                .gateway
                .recent_history(entry.conversation(), &state.mid)
                .await?;
            let lines: Vec<String> = messages
                .iter()
                .filter(|message| !message.is_card)
                .map(ChatMessage::display_line)
                .collect();
            blocks.push(UnreadBlock::Conversation {
                name: entry.display_name().to_string(),
                lines,
            });
        }
        Ok(blocks)
    }
}
