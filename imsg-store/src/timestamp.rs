//! Conversion between wall-clock time and the store's native encoding.
//!
//! The store counts time from the Apple epoch (2001-01-01 00:00:00 UTC) and
//! switched units partway through its life: rows written before the schema
//! migration hold whole seconds, rows written after hold nanoseconds. Reads
//! disambiguate by magnitude; writes always use nanoseconds.

use chrono::{DateTime, Duration, Utc};

use imsg_core::constants::{
    APPLE_EPOCH_OFFSET_SECS, NANOS_PER_SECOND, NATIVE_NANOSECOND_THRESHOLD,
};

/// Convert a native store timestamp to wall-clock time.
///
/// Values above the 10^12 boundary are nanoseconds and are scaled down;
/// values at or below it are already seconds. Sub-second precision is
/// dropped.
pub fn to_wall_clock(native: i64) -> DateTime<Utc> {
    let secs = if native > NATIVE_NANOSECOND_THRESHOLD {
        native / NANOS_PER_SECOND
    } else {
        native
    };
    DateTime::from_timestamp(secs.saturating_add(APPLE_EPOCH_OFFSET_SECS), 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Convert wall-clock time to the native encoding.
///
/// Always emits the post-migration nanosecond unit.
pub fn from_wall_clock(time: DateTime<Utc>) -> i64 {
    (time.timestamp() - APPLE_EPOCH_OFFSET_SECS).saturating_mul(NANOS_PER_SECOND)
}

/// Native timestamp for "now minus `hours`", used as a lower-bound filter.
/// Fractional hours are valid.
pub fn hours_ago(hours: f64) -> i64 {
    let delta = Duration::milliseconds((hours * 3_600_000.0) as i64);
    from_wall_clock(Utc::now() - delta)
}

/// Native timestamp for "now minus `days`". Fractional days are valid.
pub fn days_ago(days: f64) -> i64 {
    hours_ago(days * 24.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_are_seconds() {
        // 2023-03-15T00:00:00Z is 700,012,800 seconds after the Apple epoch.
        let wall = to_wall_clock(700_012_800);
        assert_eq!(wall.timestamp(), 700_012_800 + APPLE_EPOCH_OFFSET_SECS);
    }

    #[test]
    fn test_large_values_are_nanoseconds() {
        let native = 700_012_800 * NANOS_PER_SECOND;
        assert!(native > NATIVE_NANOSECOND_THRESHOLD);
        let wall = to_wall_clock(native);
        assert_eq!(wall.timestamp(), 700_012_800 + APPLE_EPOCH_OFFSET_SECS);
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly 10^12 still counts as seconds; one past it is nanoseconds.
        let at = to_wall_clock(NATIVE_NANOSECOND_THRESHOLD);
        assert_eq!(
            at.timestamp(),
            NATIVE_NANOSECOND_THRESHOLD + APPLE_EPOCH_OFFSET_SECS
        );

        let past = to_wall_clock(NATIVE_NANOSECOND_THRESHOLD + 1);
        assert_eq!(past.timestamp(), 1_000 + APPLE_EPOCH_OFFSET_SECS);
    }

    #[test]
    fn test_round_trip_within_one_second() {
        let now = Utc::now();
        let restored = to_wall_clock(from_wall_clock(now));
        let drift = (restored.timestamp() - now.timestamp()).abs();
        assert!(drift <= 1, "round trip drifted {drift}s");
    }

    #[test]
    fn test_hours_ago_decreases_with_larger_window() {
        let one = hours_ago(1.0);
        let two = hours_ago(2.0);
        assert!(two < one);

        // The gap between the two bounds is one hour of native units, give
        // or take the instants at which "now" was sampled.
        let gap = one - two;
        let hour = 3_600 * NANOS_PER_SECOND;
        assert!((gap - hour).abs() < 5 * NANOS_PER_SECOND);
    }

    #[test]
    fn test_days_ago_matches_hours_ago() {
        let from_days = days_ago(1.0);
        let from_hours = hours_ago(24.0);
        assert!((from_days - from_hours).abs() < 5 * NANOS_PER_SECOND);
    }

    #[test]
    fn test_fractional_hours() {
        let half = hours_ago(0.5);
        let full = hours_ago(1.0);
        let gap = half - full;
        let half_hour = 1_800 * NANOS_PER_SECOND;
        assert!((gap - half_hour).abs() < 5 * NANOS_PER_SECOND);
    }
}
