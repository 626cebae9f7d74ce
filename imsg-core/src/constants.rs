//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "imsg";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds between the Unix epoch and the Apple epoch (2001-01-01 00:00:00 UTC).
pub const APPLE_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// Unit disambiguation boundary for native timestamps.
///
/// Values above this are nanoseconds since the Apple epoch (post-migration
/// rows); values at or below it are whole seconds (pre-migration rows). Any
/// real seconds-since-2001 value stays far below 10^12 for the lifetime of
/// this software while any real nanosecond value sits far above it, so the
/// threshold must be preserved exactly.
pub const NATIVE_NANOSECOND_THRESHOLD: i64 = 1_000_000_000_000;

/// Nanoseconds per second, the post-migration native unit scale.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Chat style constants.
pub mod chat_style {
    /// Group (multi-party) chat style identifier.
    pub const GROUP: i32 = 43;
}

/// Default and maximum values for normalized query parameters.
pub mod query_limits {
    /// Default result limit when the caller omits one.
    pub const DEFAULT_LIMIT: i64 = 50;
    /// Hard ceiling on the result limit.
    pub const MAX_LIMIT: i64 = 500;
    /// Default lookback window in hours.
    pub const DEFAULT_HOURS: f64 = 24.0;
    /// Hard ceiling on the lookback window in hours (30 days).
    pub const MAX_HOURS: f64 = 720.0;
    /// Default lookback window in days.
    pub const DEFAULT_DAYS: f64 = 7.0;
    /// Hard ceiling on the lookback window in days.
    pub const MAX_DAYS: f64 = 365.0;
}

/// Chat preview length in characters before the ellipsis suffix.
pub const PREVIEW_MAX_CHARS: usize = 50;

/// Placeholder shown for messages that carry no textual content.
pub const NO_TEXT_PLACEHOLDER: &str = "[No text content]";

/// Label for a sender handle that could not be resolved.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Label for an unnamed direct (non-group) chat.
pub const DIRECT_MESSAGE_LABEL: &str = "Direct Message";

/// Sender label for the local user in conversation listings.
pub const SELF_SENDER: &str = "You";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_offset() {
        // 2001-01-01T00:00:00Z expressed in Unix seconds.
        assert_eq!(APPLE_EPOCH_OFFSET_SECS, 978_307_200);
    }

    #[test]
    fn test_threshold_separates_units() {
        // A 2025 timestamp in seconds sits below the boundary; the same
        // instant in nanoseconds sits far above it.
        let secs_2025: i64 = 772_000_000;
        assert!(secs_2025 <= NATIVE_NANOSECOND_THRESHOLD);
        assert!(secs_2025 * NANOS_PER_SECOND > NATIVE_NANOSECOND_THRESHOLD);
    }
}
