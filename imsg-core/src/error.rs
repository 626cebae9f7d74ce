//! Global error types for the iMessage store query layer.
//!
//! All error categories across the workspace are unified into a single
//! `ImsgError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using ImsgError.
pub type ImsgResult<T> = Result<T, ImsgError>;

/// Unified error type covering all error categories in the workspace.
#[derive(Error, Debug)]
pub enum ImsgError {
    // -- Store access errors --
    /// The message store file does not exist at the expected path.
    #[error("message store not found at {0}: open the Messages app at least once so the database is created")]
    NotFound(String),

    /// The store exists but cannot be opened with the current OS permissions.
    #[error("cannot read the message store: {0}. Grant Full Disk Access to this process in System Settings > Privacy & Security")]
    PermissionDenied(String),

    /// A column the schema guarantees is populated came back empty.
    #[error("message store corruption: {0}")]
    StoreCorruption(String),

    // -- Caller errors --
    /// A hard-required operation parameter is missing or blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Automation errors --
    /// The external automation command failed or produced unusable output.
    #[error("automation failed: {0}")]
    AutomationFailure(String),

    // -- Database errors --
    /// SQLite driver error not attributable to access or corruption.
    #[error("database error: {0}")]
    Database(String),

    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ImsgError {
    fn from(e: serde_json::Error) -> Self {
        ImsgError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for ImsgError {
    fn from(e: toml::de::Error) -> Self {
        ImsgError::Config(e.to_string())
    }
}

impl ImsgError {
    /// Whether retrying the failed operation unchanged could succeed.
    ///
    /// Store-missing and permission failures need an out-of-band fix first;
    /// corruption and bad input never resolve on their own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ImsgError::Database(_) | ImsgError::AutomationFailure(_))
    }
}
