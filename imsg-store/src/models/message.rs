//! Message read projections.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

use imsg_core::constants::{
    DIRECT_MESSAGE_LABEL, NO_TEXT_PLACEHOLDER, SELF_SENDER, UNKNOWN_SENDER,
};

use super::attachment::Attachment;
use super::non_empty;
use crate::timestamp;

/// A message row projected for recent/search listings.
///
/// Snapshot only: holds no connection and is discarded after serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// The store's native ROWID, never reassigned by this layer.
    pub rowid: i64,
    pub text: String,
    pub date: DateTime<Utc>,
    pub is_from_me: bool,
    pub has_attachments: bool,
    /// Origin handle identifier (phone or email).
    pub sender: String,
    /// Owning chat label: display name, else identifier, else a
    /// direct-message placeholder.
    pub chat_name: String,
}

impl Message {
    /// Map a joined message row.
    ///
    /// Expects columns: `rowid`, `text`, `date`, `is_from_me`,
    /// `cache_has_attachments`, `handle_id`, `display_name`,
    /// `chat_identifier`. Only the ROWID is required; every other column
    /// degrades to its documented fallback.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let rowid: i64 = row.get("rowid")?;
        let text: Option<String> = row.get("text")?;
        let date: Option<i64> = row.get("date")?;
        let is_from_me: Option<i64> = row.get("is_from_me")?;
        let has_attachments: Option<i64> = row.get("cache_has_attachments")?;
        let handle: Option<String> = row.get("handle_id")?;
        let display_name: Option<String> = row.get("display_name")?;
        let chat_identifier: Option<String> = row.get("chat_identifier")?;

        Ok(Self {
            rowid,
            text: non_empty(text).unwrap_or_else(|| NO_TEXT_PLACEHOLDER.to_string()),
            date: timestamp::to_wall_clock(date.unwrap_or(0)),
            is_from_me: is_from_me.unwrap_or(0) != 0,
            has_attachments: has_attachments.unwrap_or(0) != 0,
            sender: non_empty(handle).unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            chat_name: non_empty(display_name)
                .or_else(|| non_empty(chat_identifier))
                .unwrap_or_else(|| DIRECT_MESSAGE_LABEL.to_string()),
        })
    }
}

/// A message scoped to one contact, labeled by sender for reading order.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationMessage {
    pub rowid: i64,
    pub text: String,
    pub date: DateTime<Utc>,
    /// `"You"` for sent messages, otherwise the handle identifier.
    pub sender: String,
    pub is_from_me: bool,
    pub has_attachments: bool,
}

impl ConversationMessage {
    /// Map a conversation row.
    ///
    /// Expects columns: `rowid`, `text`, `date`, `is_from_me`,
    /// `cache_has_attachments`, `handle_id`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let rowid: i64 = row.get("rowid")?;
        let text: Option<String> = row.get("text")?;
        let date: Option<i64> = row.get("date")?;
        let is_from_me = row.get::<_, Option<i64>>("is_from_me")?.unwrap_or(0) != 0;
        let has_attachments: Option<i64> = row.get("cache_has_attachments")?;
        let handle: Option<String> = row.get("handle_id")?;

        let sender = if is_from_me {
            SELF_SENDER.to_string()
        } else {
            non_empty(handle).unwrap_or_else(|| UNKNOWN_SENDER.to_string())
        };

        Ok(Self {
            rowid,
            text: non_empty(text).unwrap_or_else(|| NO_TEXT_PLACEHOLDER.to_string()),
            date: timestamp::to_wall_clock(date.unwrap_or(0)),
            sender,
            is_from_me,
            has_attachments: has_attachments.unwrap_or(0) != 0,
        })
    }
}

/// A message paired with its full attachment list.
#[derive(Debug, Clone, Serialize)]
pub struct MessageWithAttachments {
    #[serde(flatten)]
    pub message: Message,
    pub attachments: Vec<Attachment>,
}
