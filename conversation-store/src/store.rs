//! Conversation CRUD, retention and stats over a [`KeyValueStore`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::kv::KeyValueStore;

/// Single key the whole conversation map is serialized under.
pub const STORAGE_KEY: &str = "ollm_conversations";

/// Retention cap: beyond this count the least-recently-updated conversations
/// are discarded.
pub const MAX_CONVERSATIONS: usize = 50;

/// Conversation names derived from a message are cut at this many characters.
const NAME_MAX_CHARS: usize = 50;

/// One persisted chat message. Immutable once created; ordering within a
/// conversation is append-only chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A saved transcript. Identity is `id`; `updated_at` drives retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConversation {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub model: String,
    #[serde(rename = "templateId", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub messages: Vec<StoredMessage>,
}

/// The entire persisted state, one blob under [`STORAGE_KEY`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConversationStorage {
    conversations: HashMap<String, SavedConversation>,
}

/// Summary numbers for the persisted blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageStats {
    pub total_conversations: usize,
    pub total_messages: usize,
    /// Length of the serialized blob in characters.
    pub storage_size: usize,
    pub oldest_conversation: Option<DateTime<Utc>>,
    pub newest_conversation: Option<DateTime<Utc>>,
}

/// Conversation persistence over any [`KeyValueStore`] backend.
pub struct ConversationStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Saves a transcript and returns its conversation id.
    ///
    /// With a known `conversation_id` the entry is updated in place:
    /// `created_at` and `name` are preserved, `updated_at` and `messages`
    /// refreshed. Otherwise a new entry is created with a generated id and a
    /// name derived from the first user message. After the insert the
    /// retention cap is applied and the whole map is persisted; a failed
    /// write still returns the id.
    pub fn save_conversation(
        &self,
        messages: &[StoredMessage],
        model: &str,
        template_id: Option<&str>,
        conversation_id: Option<&str>,
    ) -> String {
        let mut storage = self.read_storage();
        let now = Utc::now();

        let id = conversation_id
            .map(str::to_string)
            .unwrap_or_else(generate_conversation_id);
        let existing = storage.conversations.get(&id);

        let conversation = SavedConversation {
            id: id.clone(),
            name: existing
                .map(|c| c.name.clone())
                .unwrap_or_else(|| derive_conversation_name(messages, now)),
            created_at: existing.map(|c| c.created_at).unwrap_or(now),
            updated_at: now,
            model: model.to_string(),
            template_id: template_id.map(str::to_string),
            messages: messages.to_vec(),
        };

        storage.conversations.insert(id.clone(), conversation);
        apply_retention(&mut storage);
        self.write_storage(&storage);

        id
    }

    /// Loads one conversation by id.
    pub fn load_conversation(&self, id: &str) -> Option<SavedConversation> {
        self.read_storage().conversations.remove(id)
    }

    /// All conversations, most recently updated first.
    pub fn all_conversations(&self) -> Vec<SavedConversation> {
        let storage = self.read_storage();
        let mut conversations: Vec<SavedConversation> =
            storage.conversations.into_values().collect();
        conversations.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));
        conversations
    }

    /// Removes one conversation. True when it existed.
    pub fn delete_conversation(&self, id: &str) -> bool {
        let mut storage = self.read_storage();
        if storage.conversations.remove(id).is_some() {
            self.write_storage(&storage);
            true
        } else {
            false
        }
    }

    /// Renames a conversation and bumps its `updated_at`. True when it
    /// existed.
    pub fn update_conversation_name(&self, id: &str, name: &str) -> bool {
        let mut storage = self.read_storage();
        match storage.conversations.get_mut(id) {
            Some(conversation) => {
                conversation.name = name.to_string();
                conversation.updated_at = Utc::now();
                self.write_storage(&storage);
                true
            }
            None => false,
        }
    }

    /// Summary numbers over the persisted blob.
    pub fn storage_stats(&self) -> StorageStats {
        let storage = self.read_storage();
        let conversations: Vec<&SavedConversation> = storage.conversations.values().collect();

        StorageStats {
            total_conversations: conversations.len(),
            total_messages: conversations.iter().map(|c| c.messages.len()).sum(),
            storage_size: serde_json::to_string(&storage).map(|s| s.len()).unwrap_or(0),
            oldest_conversation: conversations.iter().map(|c| c.created_at).min(),
            newest_conversation: conversations.iter().map(|c| c.created_at).max(),
        }
    }

    /// Drops the entire blob.
    pub fn clear_all(&self) {
        self.kv.remove(STORAGE_KEY);
    }

    /// A corrupt or missing blob reads as an empty store.
    fn read_storage(&self) -> ConversationStorage {
        let Some(raw) = self.kv.get(STORAGE_KEY) else {
            return ConversationStorage::default();
        };
        match serde_json::from_str(&raw) {
            Ok(storage) => storage,
            Err(err) => {
                warn!(error = %err, "corrupt conversation blob, starting empty");
                ConversationStorage::default()
            }
        }
    }

    /// Best-effort write: serialization or backend failures are logged and
    /// swallowed.
    fn write_storage(&self, storage: &ConversationStorage) {
        match serde_json::to_string(storage) {
            Ok(raw) => {
                if !self.kv.set(STORAGE_KEY, &raw) {
                    warn!("conversation blob not persisted, keeping in-memory result");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize conversation blob"),
        }
    }
}

/// `conv_<millis>_<token>`: sortable prefix plus a random tail.
fn generate_conversation_id() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("conv_{}_{}", Utc::now().timestamp_millis(), &token[..9])
}

/// First user message, cut to [`NAME_MAX_CHARS`] with an ellipsis; dated
/// fallback when the transcript has no user message yet.
fn derive_conversation_name(messages: &[StoredMessage], now: DateTime<Utc>) -> String {
    if messages.is_empty() {
        return "New conversation".to_string();
    }

    if let Some(first_user) = messages.iter().find(|m| m.is_user) {
        let text = first_user.text.trim();
        return match text.char_indices().nth(NAME_MAX_CHARS) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        };
    }

    format!("Conversation from {}", now.format("%Y-%m-%d"))
}

/// Total order for retention and listing: recency first, id as tiebreaker so
/// equal timestamps stay deterministic.
fn recency_key(c: &SavedConversation) -> (DateTime<Utc>, String) {
    (c.updated_at, c.id.clone())
}

fn apply_retention(storage: &mut ConversationStorage) {
    if storage.conversations.len() <= MAX_CONVERSATIONS {
        return;
    }

    let mut conversations: Vec<&SavedConversation> = storage.conversations.values().collect();
    conversations.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));

    let keep: Vec<String> = conversations
        .iter()
        .take(MAX_CONVERSATIONS)
        .map(|c| c.id.clone())
        .collect();
    storage.conversations.retain(|id, _| keep.contains(id));
}
