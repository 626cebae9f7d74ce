//! Normalization of caller-supplied numeric query parameters.
//!
//! Invalid input degrades to the default rather than erroring: automated
//! callers routinely pass zero or omit fields entirely, and neither should
//! fail a query.

/// Normalize a result limit against a default and a hard ceiling.
///
/// Missing, zero, or negative values fall back to `default`; values above
/// `max` clamp to it; fractional values are floored, since a fractional
/// row count is meaningless.
pub fn normalize_limit(value: Option<f64>, default: i64, max: i64) -> i64 {
    match value {
        None => default,
        Some(v) if !v.is_finite() || v <= 0.0 => default,
        Some(v) if v > max as f64 => max,
        Some(v) => v.floor() as i64,
    }
}

/// Normalize a lookback window in hours. Fractional durations are valid
/// and pass through unmodified.
pub fn normalize_hours(value: Option<f64>, default: f64, max: f64) -> f64 {
    normalize_window(value, default, max)
}

/// Normalize a lookback window in days.
pub fn normalize_days(value: Option<f64>, default: f64, max: f64) -> f64 {
    normalize_window(value, default, max)
}

fn normalize_window(value: Option<f64>, default: f64, max: f64) -> f64 {
    match value {
        None => default,
        Some(v) if !v.is_finite() || v <= 0.0 => default,
        Some(v) if v > max => max,
        Some(v) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_missing_uses_default() {
        assert_eq!(normalize_limit(None, 50, 500), 50);
    }

    #[test]
    fn test_limit_zero_and_negative_use_default() {
        assert_eq!(normalize_limit(Some(0.0), 50, 500), 50);
        assert_eq!(normalize_limit(Some(-5.0), 50, 500), 50);
    }

    #[test]
    fn test_limit_clamps_to_max() {
        assert_eq!(normalize_limit(Some(501.0), 50, 500), 500);
        assert_eq!(normalize_limit(Some(1e9), 50, 500), 500);
    }

    #[test]
    fn test_limit_floors_fractional() {
        assert_eq!(normalize_limit(Some(10.9), 50, 500), 10);
    }

    #[test]
    fn test_limit_in_range_passes_through() {
        assert_eq!(normalize_limit(Some(500.0), 50, 500), 500);
        assert_eq!(normalize_limit(Some(1.0), 50, 500), 1);
    }

    #[test]
    fn test_limit_non_finite_uses_default() {
        assert_eq!(normalize_limit(Some(f64::NAN), 50, 500), 50);
        assert_eq!(normalize_limit(Some(f64::INFINITY), 50, 500), 50);
    }

    #[test]
    fn test_hours_fractional_passes_through() {
        assert_eq!(normalize_hours(Some(0.5), 24.0, 720.0), 0.5);
    }

    #[test]
    fn test_hours_policy() {
        assert_eq!(normalize_hours(None, 24.0, 720.0), 24.0);
        assert_eq!(normalize_hours(Some(0.0), 24.0, 720.0), 24.0);
        assert_eq!(normalize_hours(Some(-1.0), 24.0, 720.0), 24.0);
        assert_eq!(normalize_hours(Some(721.0), 24.0, 720.0), 720.0);
    }

    #[test]
    fn test_days_policy() {
        assert_eq!(normalize_days(None, 7.0, 365.0), 7.0);
        assert_eq!(normalize_days(Some(366.0), 7.0, 365.0), 365.0);
        assert_eq!(normalize_days(Some(2.5), 7.0, 365.0), 2.5);
    }
}
