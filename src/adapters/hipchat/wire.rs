//! Wire-format DTOs for the HipChat v2 API, mapped into domain entities.
//!
//! The listing endpoints use snake_case keys (`xmpp_jid`); the read-state
//! endpoint uses camelCase (`xmppJid`, `unreadCount`). Unknown fields are
//! ignored everywhere.

use crate::domain::{ChatMessage, Emoticon, RoomPrivacy, RoomSummary, UnreadState, UserSummary};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Standard paged envelope: `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Paged<T> {
    pub items: Vec<T>,
}

/// Expanded room item, from `room?expand=items` and `room/{name_or_id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RoomItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub topic: String,
    pub privacy: RoomPrivacy,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
    pub created: DateTime<Utc>,
    pub is_archived: bool,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
    pub xmpp_jid: String,
}

/// Owner stub inside a room item. Null for orphaned rooms.
#[derive(Debug, Deserialize)]
pub(crate) struct OwnerRef {
    pub id: i64,
}

impl RoomItem {
    pub(crate) fn into_domain(self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            jid: self.xmpp_jid,
            name: self.name,
            topic: self.topic,
            privacy: self.privacy,
            owner_id: self.owner.map(|owner| owner.id),
            created: self.created,
            is_archived: self.is_archived,
            last_active: self.last_active,
        }
    }
}

/// Expanded user item, from `user?expand=items`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserItem {
    pub id: i64,
    pub name: String,
    pub mention_name: String,
    pub xmpp_jid: String,
}

impl UserItem {
    pub(crate) fn into_domain(self) -> UserSummary {
        UserSummary {
            id: self.id,
            jid: self.xmpp_jid,
            name: self.name,
            mention_name: self.mention_name,
        }
    }
}

/// Read-state item, from `readstate?expand=items.unreadCount`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReadStateItem {
    pub xmpp_jid: String,
    pub mid: String,
    #[serde(default)]
    pub unread_count: Option<UnreadCountRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnreadCountRef {
    pub count: u64,
}

impl ReadStateItem {
    pub(crate) fn into_domain(self) -> UnreadState {
        UnreadState {
            jid: self.xmpp_jid,
            mid: self.mid,
            unread: self.unread_count.map(|expansion| expansion.count),
        }
    }
}

/// History item, from `{room|user}/{id}/history/latest`.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryItem {
    pub from: SenderRef,
    #[serde(default)]
    pub message: String,
    /// Present only on card messages.
    #[serde(default)]
    pub card: Option<serde_json::Value>,
}

/// `from` is a bare display name for notifications and integrations, and a
/// profile object for real users.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SenderRef {
    Name(String),
    Profile { name: String },
}

impl HistoryItem {
    pub(crate) fn into_domain(self) -> ChatMessage {
        let sender = match self.from {
            SenderRef::Name(name) => name,
            SenderRef::Profile { name } => name,
        };
        ChatMessage {
            sender,
            body: self.message,
            is_card: self.card.is_some(),
        }
    }
}

/// Emoticon metadata, from `emoticon/{shortcut}`.
#[derive(Debug, Deserialize)]
pub(crate) struct EmoticonItem {
    pub id: i64,
    pub shortcut: String,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl EmoticonItem {
    pub(crate) fn into_domain(self) -> Emoticon {
        Emoticon {
            id: self.id,
            shortcut: self.shortcut,
            url: self.url,
            width: self.width,
            height: self.height,
        }
    }
}
