//! Parameterized read-only queries over the store schema.
//!
//! Every function takes an already-open connection and runs one logical
//! lookup against the five core relations (message, handle, chat, the
//! chat/message and message/attachment joins) plus the chat/handle join.
//! All free-text predicates are bound parameters, never interpolated into
//! the SQL text. `%` and `_` supplied by a caller remain significant LIKE
//! metacharacters; this layer does not escape them.

use rusqlite::{params, Connection};

use imsg_core::constants::chat_style;
use imsg_core::error::{ImsgError, ImsgResult};

use crate::contact::ContactPatterns;
use crate::models::{Attachment, ChatSummary, ConversationMessage, Message, MessageWithAttachments};
use crate::store::DatabaseStats;

/// Translate a driver error into the workspace taxonomy.
///
/// A type error on a column the mappers read as non-optional means the
/// schema guarantee was violated; everything else stays a database error.
fn db_err(e: rusqlite::Error) -> ImsgError {
    match e {
        rusqlite::Error::InvalidColumnType(_, name, _) => ImsgError::StoreCorruption(format!(
            "required column '{name}' is missing or null in a row the schema guarantees"
        )),
        other => ImsgError::Database(other.to_string()),
    }
}

/// Shared projection for message listings: the message row joined to its
/// origin handle and owning chat.
const MESSAGE_SELECT: &str = "\
    SELECT m.ROWID AS rowid,
           m.text AS text,
           m.date AS date,
           m.is_from_me AS is_from_me,
           m.cache_has_attachments AS cache_has_attachments,
           h.id AS handle_id,
           c.display_name AS display_name,
           c.chat_identifier AS chat_identifier
    FROM message m
    LEFT JOIN handle h ON h.ROWID = m.handle_id
    LEFT JOIN chat_message_join cmj ON cmj.message_id = m.ROWID
    LEFT JOIN chat c ON c.ROWID = cmj.chat_id";

/// Shared projection for chat listings: the chat row aggregated with its
/// message count, latest activity, and latest message text.
const CHAT_SELECT: &str = "\
    SELECT c.ROWID AS rowid,
           c.guid AS guid,
           c.chat_identifier AS chat_identifier,
           c.display_name AS display_name,
           c.service_name AS service_name,
           c.style AS style,
           COUNT(m.ROWID) AS message_count,
           MAX(m.date) AS last_message_date,
           (SELECT m2.text FROM message m2
              INNER JOIN chat_message_join cmj2 ON cmj2.message_id = m2.ROWID
              WHERE cmj2.chat_id = c.ROWID
              ORDER BY m2.date DESC LIMIT 1) AS last_message_text,
           (SELECT m3.cache_has_attachments FROM message m3
              INNER JOIN chat_message_join cmj3 ON cmj3.message_id = m3.ROWID
              WHERE cmj3.chat_id = c.ROWID
              ORDER BY m3.date DESC LIMIT 1) AS last_has_attachments
    FROM chat c
    LEFT JOIN chat_message_join cmj ON cmj.chat_id = c.ROWID
    LEFT JOIN message m ON m.ROWID = cmj.message_id";

/// Messages newer than `since`, optionally filtered by the three-pattern
/// contact match, newest first.
pub fn recent_messages(
    conn: &Connection,
    since: i64,
    contact: Option<&ContactPatterns>,
    limit: i64,
) -> ImsgResult<Vec<Message>> {
    match contact {
        Some(p) => {
            let sql = format!(
                "{MESSAGE_SELECT}
                 WHERE m.date > ?1 AND (h.id LIKE ?2 OR h.id = ?3 OR h.id LIKE ?4)
                 ORDER BY m.date DESC LIMIT ?5"
            );
            let mut stmt = conn.prepare(&sql).map_err(db_err)?;
            let rows = stmt
                .query_map(
                    params![since, p.original_like, p.normalized_exact, p.normalized_like, limit],
                    Message::from_row,
                )
                .map_err(db_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err)?;
            Ok(rows)
        }
        None => {
            let sql = format!(
                "{MESSAGE_SELECT}
                 WHERE m.date > ?1
                 ORDER BY m.date DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql).map_err(db_err)?;
            let rows = stmt
                .query_map(params![since, limit], Message::from_row)
                .map_err(db_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err)?;
            Ok(rows)
        }
    }
}

/// The most recent `limit` messages with one contact since `since`,
/// returned oldest first (conversation reading order).
pub fn conversation(
    conn: &Connection,
    patterns: &ContactPatterns,
    since: i64,
    limit: i64,
) -> ImsgResult<Vec<ConversationMessage>> {
    let mut stmt = conn
        .prepare(
            "SELECT m.ROWID AS rowid,
                    m.text AS text,
                    m.date AS date,
                    m.is_from_me AS is_from_me,
                    m.cache_has_attachments AS cache_has_attachments,
                    h.id AS handle_id
             FROM message m
             LEFT JOIN handle h ON h.ROWID = m.handle_id
             WHERE m.date > ?1 AND (h.id LIKE ?2 OR h.id = ?3 OR h.id LIKE ?4)
             ORDER BY m.date DESC LIMIT ?5",
        )
        .map_err(db_err)?;

    let mut rows = stmt
        .query_map(
            params![
                since,
                patterns.original_like,
                patterns.normalized_exact,
                patterns.normalized_like,
                limit
            ],
            ConversationMessage::from_row,
        )
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;

    // The window selects the newest `limit` rows; flip them into reading order.
    rows.reverse();
    Ok(rows)
}

/// Messages newer than `since` whose text contains `query` as a substring,
/// newest first.
pub fn search_messages(
    conn: &Connection,
    query: &str,
    since: i64,
    limit: i64,
) -> ImsgResult<Vec<Message>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{MESSAGE_SELECT}
         WHERE m.date > ?1 AND m.text LIKE ?2
         ORDER BY m.date DESC LIMIT ?3"
    );
    let mut stmt = conn.prepare(&sql).map_err(db_err)?;
    let rows = stmt
        .query_map(params![since, pattern, limit], Message::from_row)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

/// All chats annotated with activity details, most recently active first.
pub fn list_chats(
    conn: &Connection,
    limit: i64,
    include_group_chats: bool,
) -> ImsgResult<Vec<ChatSummary>> {
    let group_filter = if include_group_chats {
        String::new()
    } else {
        format!("WHERE c.style IS NULL OR c.style != {}", chat_style::GROUP)
    };

    let sql = format!(
        "{CHAT_SELECT}
         {group_filter}
         GROUP BY c.ROWID
         ORDER BY last_message_date DESC
         LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql).map_err(db_err)?;
    let rows = stmt
        .query_map(params![limit], ChatSummary::from_row)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

/// Count of received messages still marked unread.
pub fn unread_count(conn: &Connection) -> ImsgResult<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM message WHERE is_from_me = 0 AND is_read = 0",
        [],
        |row| row.get(0),
    )
    .map_err(db_err)
}

/// The full attachment list for one message.
pub fn attachments_for_message(conn: &Connection, message_rowid: i64) -> ImsgResult<Vec<Attachment>> {
    let mut stmt = conn
        .prepare(
            "SELECT a.ROWID AS rowid,
                    a.filename AS filename,
                    a.transfer_name AS transfer_name,
                    a.mime_type AS mime_type,
                    a.total_bytes AS total_bytes,
                    a.is_sticker AS is_sticker
             FROM attachment a
             INNER JOIN message_attachment_join maj ON maj.attachment_id = a.ROWID
             WHERE maj.message_id = ?1
             ORDER BY a.ROWID",
        )
        .map_err(db_err)?;

    let rows = stmt
        .query_map([message_rowid], Attachment::from_row)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

/// Messages carrying at least one attachment since `since`, newest first,
/// each paired with its full attachment list.
pub fn recent_attachment_messages(
    conn: &Connection,
    since: i64,
    contact: Option<&ContactPatterns>,
    limit: i64,
) -> ImsgResult<Vec<MessageWithAttachments>> {
    let messages = match contact {
        Some(p) => {
            let sql = format!(
                "{MESSAGE_SELECT}
                 WHERE m.date > ?1 AND m.cache_has_attachments = 1
                   AND (h.id LIKE ?2 OR h.id = ?3 OR h.id LIKE ?4)
                 ORDER BY m.date DESC LIMIT ?5"
            );
            let mut stmt = conn.prepare(&sql).map_err(db_err)?;
            let rows = stmt
                .query_map(
                    params![since, p.original_like, p.normalized_exact, p.normalized_like, limit],
                    Message::from_row,
                )
                .map_err(db_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err)?;
            rows
        }
        None => {
            let sql = format!(
                "{MESSAGE_SELECT}
                 WHERE m.date > ?1 AND m.cache_has_attachments = 1
                 ORDER BY m.date DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql).map_err(db_err)?;
            let rows = stmt
                .query_map(params![since, limit], Message::from_row)
                .map_err(db_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(db_err)?;
            rows
        }
    };

    let mut out = Vec::with_capacity(messages.len());
    for message in messages {
        let attachments = attachments_for_message(conn, message.rowid)?;
        out.push(MessageWithAttachments { message, attachments });
    }
    Ok(out)
}

/// Handle identifiers of every participant joined to the given chat.
pub fn group_chat_members(conn: &Connection, chat_identifier: &str) -> ImsgResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT h.id FROM handle h
             INNER JOIN chat_handle_join chj ON chj.handle_id = h.ROWID
             INNER JOIN chat c ON c.ROWID = chj.chat_id
             WHERE c.chat_identifier = ?1
             ORDER BY h.id",
        )
        .map_err(db_err)?;

    let rows = stmt
        .query_map([chat_identifier], |row| row.get::<_, String>(0))
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

/// The single most recently active chat whose identifier matches the
/// contact heuristic, or none.
pub fn find_chat_by_contact(
    conn: &Connection,
    patterns: &ContactPatterns,
) -> ImsgResult<Option<ChatSummary>> {
    let sql = format!(
        "{CHAT_SELECT}
         WHERE c.chat_identifier LIKE ?1
            OR c.chat_identifier = ?2
            OR c.chat_identifier LIKE ?3
         GROUP BY c.ROWID
         ORDER BY last_message_date DESC
         LIMIT 1"
    );

    match conn.query_row(
        &sql,
        params![
            patterns.original_like,
            patterns.normalized_exact,
            patterns.normalized_like
        ],
        ChatSummary::from_row,
    ) {
        Ok(chat) => Ok(Some(chat)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(db_err(e)),
    }
}

/// Aggregate message, chat, and distinct-handle counts.
pub fn stats(conn: &Connection) -> ImsgResult<DatabaseStats> {
    let messages = conn
        .query_row("SELECT COUNT(*) FROM message", [], |row| row.get(0))
        .map_err(db_err)?;
    let chats = conn
        .query_row("SELECT COUNT(*) FROM chat", [], |row| row.get(0))
        .map_err(db_err)?;
    let handles = conn
        .query_row("SELECT COUNT(DISTINCT id) FROM handle", [], |row| row.get(0))
        .map_err(db_err)?;

    Ok(DatabaseStats { messages, chats, handles })
}
