//! Read projections over the store schema.
//!
//! Entities here are per-query snapshots: mapping applies the documented
//! textual fallbacks and unit conversions, holds no connection, and never
//! substitutes a default for a required identifier.

pub mod attachment;
pub mod chat;
pub mod message;

pub use attachment::Attachment;
pub use chat::ChatSummary;
pub use message::{ConversationMessage, Message, MessageWithAttachments};

/// Treat empty and whitespace-only strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
