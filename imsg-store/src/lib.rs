//! Read-only query and mapping layer over the macOS Messages store.
//!
//! This crate owns the interpretation of chat.db, not its storage: native
//! timestamp translation, caller parameter normalization, contact pattern
//! matching, parameterized read-only queries over the core relations, row
//! mapping into snapshot entities, and a pre-flight access diagnostic.

pub mod contact;
pub mod models;
pub mod params;
pub mod queries;
pub mod store;
pub mod timestamp;

// Re-export key types
pub use contact::{normalize_contact, ContactPatterns};
pub use models::attachment::format_file_size;
pub use models::{Attachment, ChatSummary, ConversationMessage, Message, MessageWithAttachments};
pub use store::{AccessResult, DatabaseStats, MessageStore};
