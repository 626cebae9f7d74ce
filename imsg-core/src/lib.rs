//! Foundation crate for the iMessage store query layer.
//!
//! Provides the shared pieces used by the other workspace crates:
//! - Unified error types covering store access, caller input, and automation
//! - Application configuration (store path, query policies, logging)
//! - Structured logging with tracing
//! - Common constants (Apple epoch, unit threshold, chat style codes)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{ImsgError, ImsgResult};
pub use logging::init_logging;
