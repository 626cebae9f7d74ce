//! Attachment read projection.

use rusqlite::Row;
use serde::Serialize;

use super::non_empty;

/// A file attachment linked to a message.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    /// The store's native ROWID.
    pub rowid: i64,
    /// Display name, preferring the transfer name over the raw filename.
    pub filename: String,
    pub mime_type: String,
    /// On-disk path as recorded by the store, when present.
    pub file_path: Option<String>,
    pub total_bytes: Option<i64>,
    pub is_sticker: bool,
    /// Voice memo sent through the app: audio MIME type plus an
    /// "Audio Message" transfer name.
    pub is_audio_message: bool,
}

impl Attachment {
    /// Map an attachment row.
    ///
    /// Expects columns: `rowid`, `filename`, `transfer_name`, `mime_type`,
    /// `total_bytes`, `is_sticker`. Only the ROWID is required.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let rowid: i64 = row.get("rowid")?;
        let file_path: Option<String> = row.get("filename")?;
        let transfer_name: Option<String> = row.get("transfer_name")?;
        let mime_type: Option<String> = row.get("mime_type")?;
        let total_bytes: Option<i64> = row.get("total_bytes")?;
        let is_sticker: Option<i64> = row.get("is_sticker")?;

        let mime = non_empty(mime_type).unwrap_or_else(|| "unknown".to_string());
        let is_audio_message = mime.starts_with("audio/")
            && transfer_name
                .as_deref()
                .map_or(false, |name| name.contains("Audio Message"));

        Ok(Self {
            rowid,
            filename: non_empty(transfer_name)
                .or_else(|| non_empty(file_path.clone()))
                .unwrap_or_else(|| "Unknown".to_string()),
            mime_type: mime,
            file_path,
            total_bytes,
            is_sticker: is_sticker.unwrap_or(0) != 0,
            is_audio_message,
        })
    }

    /// Human-readable byte size for this attachment.
    pub fn human_file_size(&self) -> String {
        format_file_size(self.total_bytes)
    }
}

/// Human-readable byte size; zero or unknown sizes read as "Unknown size".
pub fn format_file_size(bytes: Option<i64>) -> String {
    match bytes {
        None => "Unknown size".to_string(),
        Some(b) if b <= 0 => "Unknown size".to_string(),
        Some(b) if b >= 1_073_741_824 => format!("{:.1} GB", b as f64 / 1_073_741_824.0),
        Some(b) if b >= 1_048_576 => format!("{:.1} MB", b as f64 / 1_048_576.0),
        Some(b) if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        Some(b) => format!("{b} B"),
    }
}
