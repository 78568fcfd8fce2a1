//! Shared test fixtures and in-memory port doubles.

use crate::domain::{
    ChatMessage, Conversation, ConversationKind, Directory, DomainError, Emoticon, RoomPrivacy,
    RoomSummary, UnreadState, UserSummary,
};
use crate::ports::{ChatGateway, DirectoryStore};
use chrono::TimeZone;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn room(id: i64, jid: &str, name: &str) -> RoomSummary {
    RoomSummary {
        id,
        jid: jid.into(),
        name: name.into(),
        topic: String::new(),
        privacy: RoomPrivacy::Public,
        owner_id: Some(1),
        created: chrono::Utc.with_ymd_and_hms(2014, 6, 1, 12, 0, 0).unwrap(),
        is_archived: false,
        last_active: None,
    }
}

pub fn user(id: i64, jid: &str, name: &str, mention_name: &str) -> UserSummary {
    UserSummary {
        id,
        jid: jid.into(),
        name: name.into(),
        mention_name: mention_name.into(),
    }
}

pub fn state(jid: &str, mid: &str, unread: Option<u64>) -> UnreadState {
    UnreadState {
        jid: jid.into(),
        mid: mid.into(),
        unread,
    }
}

pub fn message(sender: &str, body: &str) -> ChatMessage {
    ChatMessage {
        sender: sender.into(),
        body: body.into(),
        is_card: false,
    }
}

pub fn card(sender: &str) -> ChatMessage {
    ChatMessage {
        sender: sender.into(),
        body: "rich content".into(),
        is_card: true,
    }
}

pub fn emoticon(shortcut: &str, url: &str) -> Emoticon {
    Emoticon {
        id: 1,
        shortcut: shortcut.into(),
        url: url.into(),
        width: Some(30),
        height: Some(30),
    }
}

/// Scripted ChatGateway double. Records calls with their arguments in order.
#[derive(Default)]
pub struct MockGateway {
    pub rooms: Vec<RoomSummary>,
    pub users: Vec<UserSummary>,
    pub states: Vec<UnreadState>,
    /// History per conversation id, returned for any `not_before` marker.
    pub history: HashMap<i64, Vec<ChatMessage>>,
    pub emoticon: Option<Emoticon>,
    pub image: Vec<u8>,
    /// Fail the user listing to exercise all-or-nothing rebuilds.
    pub fail_users: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait::async_trait]
impl ChatGateway for MockGateway {
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, DomainError> {
        self.record("list_rooms");
        Ok(self.rooms.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, DomainError> {
        self.record("list_users");
        if self.fail_users {
            return Err(DomainError::Api {
                status: 500,
                body: "user listing failed".into(),
            });
        }
        Ok(self.users.clone())
    }

    async fn get_room(&self, name_or_id: &str) -> Result<RoomSummary, DomainError> {
        self.record(format!("get_room {}", name_or_id));
        self.rooms.first().cloned().ok_or(DomainError::Api {
            status: 404,
            body: "no such room".into(),
        })
    }

    async fn read_states(&self) -> Result<Vec<UnreadState>, DomainError> {
        self.record("read_states");
        Ok(self.states.clone())
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
        self.record(format!(
            "history {}/{} not_before={}",
            scope, conversation.id, not_before
        ));
        Ok(self.history.get(&conversation.id).cloned().unwrap_or_default())
    }

    async fn get_emoticon(&self, shortcut: &str) -> Result<Emoticon, DomainError> {
        self.record(format!("get_emoticon {}", shortcut));
        self.emoticon.clone().ok_or(DomainError::Api {
            status: 404,
            body: "no such emoticon".into(),
        })
    }

    async fn fetch_image(&self, url: &str, cap: u64) -> Result<Vec<u8>, DomainError> {
        self.record(format!("fetch_image {} cap={}", url, cap));
        let size = self.image.len() as u64;
        if size > cap {
            return Err(DomainError::ImageTooLarge { size, cap });
        }
        Ok(self.image.clone())
    }
}

/// In-memory DirectoryStore double.
#[derive(Default)]
pub struct MemoryStore {
    contents: Mutex<Option<Directory>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// A store that already holds a persisted snapshot.
    pub fn holding(directory: Directory) -> Self {
        Self {
            contents: Mutex::new(Some(directory)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Option<Directory> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DirectoryStore for MemoryStore {
    async fn load(&self) -> Option<Directory> {
        self.contents.lock().unwrap().clone()
    }

    async fn save(&self, directory: &Directory) -> Result<(), DomainError> {
        *self.contents.lock().unwrap() = Some(directory.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
