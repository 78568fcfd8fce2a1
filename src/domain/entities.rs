//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here; wire payloads are mapped into these by adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A resolved chat entity, keyed in the [`Directory`] by its JID.
///
/// The tag round-trips through the cache file as `"type": "room" | "user"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DirectoryEntry {
    Room(RoomSummary),
    User(UserSummary),
}

impl DirectoryEntry {
    /// JID the entry is keyed by.
    pub fn jid(&self) -> &str {
        match self {
            DirectoryEntry::Room(room) => &room.jid,
            DirectoryEntry::User(user) => &user.jid,
        }
    }

    /// Name shown as the conversation header in reports.
    pub fn display_name(&self) -> &str {
        match self {
            DirectoryEntry::Room(room) => &room.name,
            DirectoryEntry::User(user) => &user.name,
        }
    }

    /// Typed id the history endpoints address this entry by.
    pub fn conversation(&self) -> Conversation {
        match self {
            DirectoryEntry::Room(room) => Conversation {
                kind: ConversationKind::Room,
                id: room.id,
            },
            DirectoryEntry::User(user) => Conversation {
                kind: ConversationKind::User,
                id: user.id,
            },
        }
    }
}

/// A room as reported by the expanded room listing (and the room detail call).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: i64,
    pub jid: String,
    pub name: String,
    #[serde(default)]
    pub topic: String,
    pub privacy: RoomPrivacy,
    pub owner_id: Option<i64>,
    pub created: DateTime<Utc>,
    pub is_archived: bool,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomPrivacy {
    Public,
    Private,
}

impl fmt::Display for RoomPrivacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomPrivacy::Public => write!(f, "public"),
            RoomPrivacy::Private => write!(f, "private"),
        }
    }
}

/// A user as reported by the expanded user listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub jid: String,
    pub name: String,
    pub mention_name: String,
}

/// Addressing for history fetches: `room/{id}` or `user/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conversation {
    pub kind: ConversationKind,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationKind {
    Room,
    User,
}

/// The resolved JID -> entry mapping, cached on disk as a single snapshot.
///
/// On-disk layout: `{ "data": { jid -> entry }, "timestamp": <capture time> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(rename = "data")]
    pub entries: HashMap<String, DirectoryEntry>,
    /// Capture time of the snapshot. Written on every persist; nothing reads
    /// it back yet (reserved for staleness checks).
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

impl Directory {
    /// Merge full room and user listings into a fresh snapshot.
    ///
    /// Users are merged after rooms, so on a JID collision the user entry
    /// replaces the room entry.
    pub fn from_listings(rooms: Vec<RoomSummary>, users: Vec<UserSummary>) -> Self {
        let mut entries = HashMap::with_capacity(rooms.len() + users.len());
        for room in rooms {
            let entry = DirectoryEntry::Room(room);
            entries.insert(entry.jid().to_string(), entry);
        }
        for user in users {
            let entry = DirectoryEntry::User(user);
            entries.insert(entry.jid().to_string(), entry);
        }
        Self {
            entries,
            captured_at: Utc::now(),
        }
    }

    /// Look up a JID. `None` means "unknown conversation", not an error.
    pub fn resolve(&self, jid: &str) -> Option<&DirectoryEntry> {
        self.entries.get(jid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One entry from the read-state listing. Ephemeral; produced fresh per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnreadState {
    pub jid: String,
    /// Id of the last message the user has seen; history is fetched from this
    /// marker forward.
    pub mid: String,
    /// Unread count from the `unreadCount` expansion, when present.
    pub unread: Option<u64>,
}

impl UnreadState {
    /// True when the service reported a non-zero unread count.
    pub fn has_unread(&self) -> bool {
        self.unread.is_some_and(|count| count > 0)
    }
}

/// A history message reduced to what the unread report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Display name, already flattened from the string-or-object sender.
    pub sender: String,
    pub body: String,
    /// Card messages carry rich content and are excluded from text output.
    pub is_card: bool,
}

impl ChatMessage {
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.sender, self.body)
    }
}

/// One block of the unread report, in service order.
#[derive(Debug, Clone, PartialEq)]
pub enum UnreadBlock {
    /// A resolved conversation: header name plus one line per text message.
    Conversation { name: String, lines: Vec<String> },
    /// A read state whose JID is missing from the directory. Reported
    /// verbatim so the run can continue past it.
    Unresolved(UnreadState),
}

/// Custom emoticon metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Emoticon {
    pub id: i64,
    pub shortcut: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Emoticon {
    /// Best-effort file name for terminal image protocols, taken from the
    /// image URL's last path segment.
    pub fn file_name(&self) -> &str {
        self.url
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&self.shortcut)
    }
}
