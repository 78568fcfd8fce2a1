//! Implements ChatGateway against the HipChat v2 REST API.
//!
//! One GET per call with bearer-token auth; no retries, no rate limiting.
//! 401 maps to an authentication failure, any other non-success status to a
//! request failure carrying status and (truncated) body.

use crate::adapters::hipchat::wire::{
    EmoticonItem, HistoryItem, Paged, ReadStateItem, RoomItem, UserItem,
};
use crate::domain::{
    ChatMessage, Conversation, ConversationKind, DomainError, Emoticon, RoomSummary, UnreadState,
    UserSummary,
};
use crate::ports::ChatGateway;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Page ceiling for the room and user listings. No cursor following.
const MAX_RESULTS: u32 = 1000;

/// HipChat gateway adapter. Wraps one shared reqwest client.
pub struct HipchatGateway {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HipchatGateway {
    /// `base_url` points at the `/v2` root, without a trailing slash.
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Issue one authenticated GET and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("GET {}: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(Self::failure(path, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Http(format!("decoding {}: {}", path, e)))
    }

    /// Classify a non-success response. 401 is an authentication failure;
    /// everything else is a request failure for the calling code path.
    async fn failure(context: &str, response: Response) -> DomainError {
        let status = response.status();
        let body = truncate(&response.text().await.unwrap_or_default());
        warn!(status = %status, context, "chat service returned an error");
        if status == StatusCode::UNAUTHORIZED {
            DomainError::Auth(format!("{}: {}", context, body))
        } else {
            DomainError::Api {
                status: status.as_u16(),
                body: format!("{}: {}", context, body),
            }
        }
    }
}

#[async_trait::async_trait]
impl ChatGateway for HipchatGateway {
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, DomainError> {
        let page: Paged<RoomItem> = self
            .get(&format!("room?expand=items&max-results={}", MAX_RESULTS))
            .await?;
        Ok(page.items.into_iter().map(RoomItem::into_domain).collect())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, DomainError> {
        let page: Paged<UserItem> = self
            .get(&format!("user?expand=items&max-results={}", MAX_RESULTS))
            .await?;
        Ok(page.items.into_iter().map(UserItem::into_domain).collect())
    }

    async fn get_room(&self, name_or_id: &str) -> Result<RoomSummary, DomainError> {
        let item: RoomItem = self.get(&format!("room/{}", name_or_id)).await?;
        Ok(item.into_domain())
    }

    async fn read_states(&self) -> Result<Vec<UnreadState>, DomainError> {
        let page: Paged<ReadStateItem> = self.get("readstate?expand=items.unreadCount").await?;
        Ok(page
            .items
            .into_iter()
            .map(ReadStateItem::into_domain)
            .collect())
    }

    async fn recent_history(
        &self,
        conversation: Conversation,
        not_before: &str,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let scope = match conversation.kind {
            ConversationKind::Room => "room",
            ConversationKind::User => "user",
        };
        let page: Paged<HistoryItem> = self
            .get(&format!(
                "{}/{}/history/latest?not-before={}",
                scope, conversation.id, not_before
            ))
            .await?;
        Ok(page
            .items
            .into_iter()
            .map(HistoryItem::into_domain)
            .collect())
    }

    async fn get_emoticon(&self, shortcut: &str) -> Result<Emoticon, DomainError> {
        let item: EmoticonItem = self.get(&format!("emoticon/{}", shortcut)).await?;
        Ok(item.into_domain())
    }

    /// Raw image download from the absolute URL an emoticon carries. The cap
    /// is enforced twice: against the declared Content-Length before reading
    /// any body, and against the running byte count while reading.
    async fn fetch_image(&self, url: &str, cap: u64) -> Result<Vec<u8>, DomainError> {
        debug!(%url, cap, "downloading image");
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("GET {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Self::failure(url, response).await);
        }

        let mut guard = SizeGuard::new(cap);
        guard.declared(response.content_length())?;

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DomainError::Http(format!("reading {}: {}", url, e)))?
        {
            guard.add(chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

/// Cap error bodies quoted in diagnostics.
fn truncate(text: &str) -> String {
    text.chars().take(200).collect()
}

/// Running byte budget for a download.
struct SizeGuard {
    cap: u64,
    total: u64,
}

impl SizeGuard {
    fn new(cap: u64) -> Self {
        Self { cap, total: 0 }
    }

    /// Reject up front when the declared content length already exceeds the cap.
    fn declared(&self, length: Option<u64>) -> Result<(), DomainError> {
        match length {
            Some(size) if size > self.cap => Err(DomainError::ImageTooLarge { size, cap: self.cap }),
            _ => Ok(()),
        }
    }

    /// Account for a received chunk, failing once the cap is crossed.
    fn add(&mut self, len: usize) -> Result<(), DomainError> {
        self.total += len as u64;
        if self.total > self.cap {
            return Err(DomainError::ImageTooLarge {
                size: self.total,
                cap: self.cap,
            });
        }
        Ok(())
    }
}
