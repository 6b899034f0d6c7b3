//! Conversation persistence: ordered transcripts saved as one JSON blob in a
//! key-value store, with a bounded retention policy and naming heuristics.
//!
//! Persistence here is best-effort: history is a convenience feature, not
//! critical state. A corrupt or missing blob reads as an empty
//! store; a failed write is logged and swallowed while the operation still
//! returns its result.
//!
//! The storage backend is the narrow [`KeyValueStore`] seam so the retention
//! and CRUD logic is testable without a real backend. [`debounce::Debouncer`]
//! is the timer primitive behind auto-save: schedule-after-delay with
//! cancel-on-superseding-call.

pub mod debounce;
pub mod kv;
pub mod store;

pub use debounce::Debouncer;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
    ConversationStore, MAX_CONVERSATIONS, STORAGE_KEY, SavedConversation, StorageStats,
    StoredMessage,
};
