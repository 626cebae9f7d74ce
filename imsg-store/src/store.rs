//! Read-only access to the Messages store.
//!
//! `MessageStore` holds only the store path and the query parameter policy.
//! Every operation opens its own read-only connection, runs its statements,
//! and drops the connection before returning; nothing is pooled, cached, or
//! shared between calls. A failed query surfaces immediately with no retry.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use tracing::{debug, warn};

use imsg_core::config::QueryConfig;
use imsg_core::error::{ImsgError, ImsgResult};

use crate::contact::ContactPatterns;
use crate::models::{Attachment, ChatSummary, ConversationMessage, Message, MessageWithAttachments};
use crate::params;
use crate::queries;
use crate::timestamp;

/// Aggregate row counts over the store.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStats {
    pub messages: i64,
    pub chats: i64,
    /// Distinct handle identifiers.
    pub handles: i64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "messages={}, chats={}, handles={}",
            self.messages, self.chats, self.handles
        )
    }
}

/// Outcome of the pre-flight access check.
#[derive(Debug, Clone, Serialize)]
pub struct AccessResult {
    pub accessible: bool,
    /// Remediation message when the store is not accessible.
    pub error: Option<String>,
}

impl AccessResult {
    fn ok() -> Self {
        Self { accessible: true, error: None }
    }

    fn denied(message: String) -> Self {
        Self { accessible: false, error: Some(message) }
    }
}

/// Handle to the message store file.
#[derive(Debug, Clone)]
pub struct MessageStore {
    path: PathBuf,
    query: QueryConfig,
}

impl MessageStore {
    /// Create a store handle for the given path with default query policies.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            query: QueryConfig::default(),
        }
    }

    /// Create a store handle with an explicit query parameter policy.
    pub fn with_query_config(path: impl Into<PathBuf>, query: QueryConfig) -> Self {
        Self { path: path.into(), query }
    }

    /// The configured store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a short-lived read-only connection.
    ///
    /// The returned connection is dropped by the calling operation before
    /// it returns, on success and failure alike.
    fn open(&self) -> ImsgResult<Connection> {
        if !self.path.exists() {
            return Err(ImsgError::NotFound(self.path.display().to_string()));
        }
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| ImsgError::PermissionDenied(e.to_string()))
    }

    // ─── Query operations ────────────────────────────────────────────────

    /// Messages newer than the lookback window, optionally filtered by
    /// contact, newest first.
    pub fn recent_messages(
        &self,
        hours: Option<f64>,
        contact: Option<&str>,
        limit: Option<f64>,
    ) -> ImsgResult<Vec<Message>> {
        let hours = params::normalize_hours(hours, self.query.default_hours, self.query.max_hours);
        let limit = params::normalize_limit(limit, self.query.default_limit, self.query.max_limit);
        let since = timestamp::hours_ago(hours);
        let patterns = contact
            .filter(|c| !c.trim().is_empty())
            .map(ContactPatterns::new);

        let conn = self.open()?;
        let rows = queries::recent_messages(&conn, since, patterns.as_ref(), limit)?;
        debug!(count = rows.len(), hours, limit, "recent messages loaded");
        Ok(rows)
    }

    /// The conversation with one contact over the lookback window, oldest
    /// first. The contact is required.
    pub fn conversation(
        &self,
        contact: &str,
        days: Option<f64>,
        limit: Option<f64>,
    ) -> ImsgResult<Vec<ConversationMessage>> {
        let contact = contact.trim();
        if contact.is_empty() {
            return Err(ImsgError::InvalidInput(
                "a contact (phone number or email) is required for conversation lookup".into(),
            ));
        }

        let days = params::normalize_days(days, self.query.default_days, self.query.max_days);
        let limit = params::normalize_limit(limit, self.query.default_limit, self.query.max_limit);
        let since = timestamp::days_ago(days);
        let patterns = ContactPatterns::new(contact);

        let conn = self.open()?;
        let rows = queries::conversation(&conn, &patterns, since, limit)?;
        debug!(count = rows.len(), contact, days, "conversation loaded");
        Ok(rows)
    }

    /// Messages whose text contains `query` as a substring, newest first.
    /// The query is required.
    pub fn search(
        &self,
        query: &str,
        days: Option<f64>,
        limit: Option<f64>,
    ) -> ImsgResult<Vec<Message>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ImsgError::InvalidInput("a search query is required".into()));
        }

        let days = params::normalize_days(days, self.query.default_days, self.query.max_days);
        let limit = params::normalize_limit(limit, self.query.default_limit, self.query.max_limit);
        let since = timestamp::days_ago(days);

        let conn = self.open()?;
        let rows = queries::search_messages(&conn, query, since, limit)?;
        debug!(count = rows.len(), query, "search completed");
        Ok(rows)
    }

    /// All chats with activity annotations, most recently active first.
    /// Group chats can be excluded.
    pub fn list_chats(
        &self,
        limit: Option<f64>,
        include_group_chats: bool,
    ) -> ImsgResult<Vec<ChatSummary>> {
        let limit = params::normalize_limit(limit, self.query.default_limit, self.query.max_limit);

        let conn = self.open()?;
        let rows = queries::list_chats(&conn, limit, include_group_chats)?;
        debug!(count = rows.len(), include_group_chats, "chats listed");
        Ok(rows)
    }

    /// Count of received messages still marked unread.
    pub fn unread_count(&self) -> ImsgResult<i64> {
        let conn = self.open()?;
        queries::unread_count(&conn)
    }

    /// The full attachment list for one message.
    pub fn attachments_for_message(&self, message_rowid: i64) -> ImsgResult<Vec<Attachment>> {
        let conn = self.open()?;
        queries::attachments_for_message(&conn, message_rowid)
    }

    /// Messages carrying attachments over the lookback window, newest
    /// first, each paired with its attachment list.
    pub fn recent_attachment_messages(
        &self,
        days: Option<f64>,
        contact: Option<&str>,
        limit: Option<f64>,
    ) -> ImsgResult<Vec<MessageWithAttachments>> {
        let days = params::normalize_days(days, self.query.default_days, self.query.max_days);
        let limit = params::normalize_limit(limit, self.query.default_limit, self.query.max_limit);
        let since = timestamp::days_ago(days);
        let patterns = contact
            .filter(|c| !c.trim().is_empty())
            .map(ContactPatterns::new);

        let conn = self.open()?;
        let rows = queries::recent_attachment_messages(&conn, since, patterns.as_ref(), limit)?;
        debug!(count = rows.len(), days, "attachment messages loaded");
        Ok(rows)
    }

    /// Handle identifiers of every participant joined to the given chat.
    /// The chat identifier is required.
    pub fn group_chat_members(&self, chat_identifier: &str) -> ImsgResult<Vec<String>> {
        let chat_identifier = chat_identifier.trim();
        if chat_identifier.is_empty() {
            return Err(ImsgError::InvalidInput(
                "a chat identifier is required for member lookup".into(),
            ));
        }

        let conn = self.open()?;
        queries::group_chat_members(&conn, chat_identifier)
    }

    /// The most recently active chat matching the contact heuristic, or
    /// none. The contact is required.
    pub fn find_chat_by_contact(&self, contact: &str) -> ImsgResult<Option<ChatSummary>> {
        let contact = contact.trim();
        if contact.is_empty() {
            return Err(ImsgError::InvalidInput(
                "a contact (phone number or email) is required for chat lookup".into(),
            ));
        }

        let patterns = ContactPatterns::new(contact);
        let conn = self.open()?;
        queries::find_chat_by_contact(&conn, &patterns)
    }

    /// Aggregate message, chat, and distinct-handle counts.
    pub fn stats(&self) -> ImsgResult<DatabaseStats> {
        let conn = self.open()?;
        queries::stats(&conn)
    }

    // ─── Access diagnostics ──────────────────────────────────────────────

    /// Pre-flight access check: existence, readability, then an open probe.
    ///
    /// Reports instead of throwing; stops at the first failing step. The
    /// probe connection is closed immediately and no query is run.
    pub fn check_access(&self) -> AccessResult {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "message store not found");
            return AccessResult::denied(format!(
                "Messages database not found at {}. Open the Messages app at least once so the database is created.",
                self.path.display()
            ));
        }

        if let Err(e) = std::fs::File::open(&self.path) {
            warn!(path = %self.path.display(), "message store not readable: {e}");
            return AccessResult::denied(format!(
                "Cannot read the Messages database. Grant Full Disk Access to this process in System Settings > Privacy & Security. ({e})"
            ));
        }

        match Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        ) {
            Ok(conn) => {
                drop(conn);
                AccessResult::ok()
            }
            Err(e) => {
                warn!(path = %self.path.display(), "message store open probe failed: {e}");
                AccessResult::denied(format!(
                    "Cannot open the Messages database. Grant Full Disk Access to this process in System Settings > Privacy & Security. Underlying error: {e}"
                ))
            }
        }
    }
}
