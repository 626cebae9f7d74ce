//! Chat (conversation) read projection.

use rusqlite::Row;
use serde::Serialize;

use imsg_core::constants::{chat_style, PREVIEW_MAX_CHARS};

use super::non_empty;
use crate::timestamp;

/// A chat annotated with activity details for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSummary {
    /// The store's native ROWID.
    pub rowid: i64,
    /// Stable identifier string (chat_identifier, falling back to guid).
    pub identifier: String,
    /// Display label, falling back to the identifier.
    pub name: String,
    pub service_name: String,
    /// Derived from the numeric style code; 43 denotes a group chat.
    pub is_group: bool,
    pub message_count: i64,
    /// Formatted wall-clock time of the latest message, or `"Unknown"` for
    /// a chat with no messages.
    pub last_message_at: String,
    /// Latest message text truncated for display; `"Attachment"` when the
    /// latest message carries one but no text; absent for empty chats.
    pub last_message_preview: Option<String>,
}

impl ChatSummary {
    /// Map an aggregated chat row.
    ///
    /// Expects columns: `rowid`, `guid`, `chat_identifier`, `display_name`,
    /// `service_name`, `style`, `message_count`, `last_message_date`,
    /// `last_message_text`, `last_has_attachments`. ROWID and guid are
    /// required; everything else degrades to its documented fallback.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let rowid: i64 = row.get("rowid")?;
        let guid: String = row.get("guid")?;
        let chat_identifier: Option<String> = row.get("chat_identifier")?;
        let display_name: Option<String> = row.get("display_name")?;
        let service_name: Option<String> = row.get("service_name")?;
        let style: Option<i64> = row.get("style")?;
        let message_count: Option<i64> = row.get("message_count")?;
        let last_message_date: Option<i64> = row.get("last_message_date")?;
        let last_message_text: Option<String> = row.get("last_message_text")?;
        let last_has_attachments: Option<i64> = row.get("last_has_attachments")?;

        let identifier = non_empty(chat_identifier).unwrap_or(guid);
        let name = non_empty(display_name).unwrap_or_else(|| identifier.clone());

        let last_message_at = match last_message_date {
            Some(native) => timestamp::to_wall_clock(native)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => "Unknown".to_string(),
        };

        let last_message_preview = match non_empty(last_message_text) {
            Some(text) => Some(preview(&text)),
            None if last_has_attachments.unwrap_or(0) != 0 => Some("Attachment".to_string()),
            None => None,
        };

        Ok(Self {
            rowid,
            identifier,
            name,
            service_name: non_empty(service_name).unwrap_or_else(|| "iMessage".to_string()),
            is_group: style.unwrap_or(0) == chat_style::GROUP as i64,
            message_count: message_count.unwrap_or(0),
            last_message_at,
            last_message_preview,
        })
    }
}

/// Truncate preview text to the display length, suffixing an ellipsis only
/// when something was actually cut.
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
