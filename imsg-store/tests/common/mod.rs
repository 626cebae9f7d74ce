//! Shared fixtures for integration tests.
//!
//! Builds a temporary SQLite file shaped like the subset of chat.db this
//! crate reads, seeds it through a plain read-write connection, and hands
//! back a `MessageStore` over the same path.

#![allow(dead_code)]

use rusqlite::{params, Connection};
use tempfile::TempDir;

use imsg_store::MessageStore;

const FIXTURE_SCHEMA: &str = r#"
CREATE TABLE message (
    ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT,
    handle_id INTEGER DEFAULT 0,
    date INTEGER DEFAULT 0,
    is_from_me INTEGER DEFAULT 0,
    is_read INTEGER DEFAULT 0,
    cache_has_attachments INTEGER DEFAULT 0
);
CREATE TABLE handle (
    ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL,
    service TEXT DEFAULT 'iMessage'
);
CREATE TABLE chat (
    ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
    guid TEXT NOT NULL,
    chat_identifier TEXT,
    display_name TEXT,
    service_name TEXT DEFAULT 'iMessage',
    style INTEGER DEFAULT 45
);
CREATE TABLE chat_message_join (
    chat_id INTEGER NOT NULL,
    message_id INTEGER NOT NULL
);
CREATE TABLE chat_handle_join (
    chat_id INTEGER NOT NULL,
    handle_id INTEGER NOT NULL
);
CREATE TABLE attachment (
    ROWID INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT,
    transfer_name TEXT,
    mime_type TEXT,
    total_bytes INTEGER,
    is_sticker INTEGER DEFAULT 0
);
CREATE TABLE message_attachment_join (
    message_id INTEGER NOT NULL,
    attachment_id INTEGER NOT NULL
);
"#;

/// Create an empty fixture store. The TempDir must be held alive for the
/// duration of the test.
pub fn create_test_store() -> (MessageStore, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("chat.db");
    let conn = Connection::open(&path).expect("failed to create fixture db");
    conn.execute_batch(FIXTURE_SCHEMA)
        .expect("failed to create fixture schema");
    (MessageStore::new(path), dir)
}

/// Open a writable connection to the fixture for seeding.
pub fn writable(store: &MessageStore) -> Connection {
    Connection::open(store.path()).expect("failed to open fixture for writing")
}

pub fn insert_handle(conn: &Connection, id: &str) -> i64 {
    conn.execute("INSERT INTO handle (id) VALUES (?1)", [id])
        .expect("failed to insert handle");
    conn.last_insert_rowid()
}

pub fn insert_chat(
    conn: &Connection,
    guid: &str,
    chat_identifier: Option<&str>,
    display_name: Option<&str>,
    style: i64,
) -> i64 {
    conn.execute(
        "INSERT INTO chat (guid, chat_identifier, display_name, style) VALUES (?1, ?2, ?3, ?4)",
        params![guid, chat_identifier, display_name, style],
    )
    .expect("failed to insert chat");
    conn.last_insert_rowid()
}

pub fn insert_message(
    conn: &Connection,
    text: Option<&str>,
    handle_id: i64,
    date: i64,
    is_from_me: bool,
) -> i64 {
    conn.execute(
        "INSERT INTO message (text, handle_id, date, is_from_me) VALUES (?1, ?2, ?3, ?4)",
        params![text, handle_id, date, is_from_me as i64],
    )
    .expect("failed to insert message");
    conn.last_insert_rowid()
}

pub fn mark_unread(conn: &Connection, message_id: i64) {
    conn.execute("UPDATE message SET is_read = 0 WHERE ROWID = ?1", [message_id])
        .expect("failed to mark unread");
}

pub fn mark_read(conn: &Connection, message_id: i64) {
    conn.execute("UPDATE message SET is_read = 1 WHERE ROWID = ?1", [message_id])
        .expect("failed to mark read");
}

pub fn link_message_to_chat(conn: &Connection, chat_id: i64, message_id: i64) {
    conn.execute(
        "INSERT INTO chat_message_join (chat_id, message_id) VALUES (?1, ?2)",
        params![chat_id, message_id],
    )
    .expect("failed to link message to chat");
}

pub fn link_handle_to_chat(conn: &Connection, chat_id: i64, handle_id: i64) {
    conn.execute(
        "INSERT INTO chat_handle_join (chat_id, handle_id) VALUES (?1, ?2)",
        params![chat_id, handle_id],
    )
    .expect("failed to link handle to chat");
}

pub fn insert_attachment(
    conn: &Connection,
    message_id: i64,
    filename: Option<&str>,
    transfer_name: Option<&str>,
    mime_type: Option<&str>,
    total_bytes: Option<i64>,
) -> i64 {
    conn.execute(
        "INSERT INTO attachment (filename, transfer_name, mime_type, total_bytes) VALUES (?1, ?2, ?3, ?4)",
        params![filename, transfer_name, mime_type, total_bytes],
    )
    .expect("failed to insert attachment");
    let attachment_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO message_attachment_join (message_id, attachment_id) VALUES (?1, ?2)",
        params![message_id, attachment_id],
    )
    .expect("failed to link attachment to message");
    conn.execute(
        "UPDATE message SET cache_has_attachments = 1 WHERE ROWID = ?1",
        [message_id],
    )
    .expect("failed to flag attachment presence");
    attachment_id
}
