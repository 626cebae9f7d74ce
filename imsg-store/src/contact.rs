//! Candidate pattern generation for free-form contact input.
//!
//! Stored handle identifiers are inconsistent across accounts: raw digits,
//! E.164-normalized numbers, or email addresses depending on service and
//! era. A lookup therefore has to try the caller's input as given, the
//! normalized form, and substrings of both.

/// Normalize a free-form contact string toward E.164.
///
/// Strips everything except digits and a leading `+`. An 11-digit run
/// starting with `1` gains a `+`; a 10-digit run gains `+1`; an already
/// `+`-prefixed run passes through stripped. Anything else (emails, non-US
/// or malformed numbers) is returned unchanged rather than guessed at.
pub fn normalize_contact(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_digit() {
            stripped.push(c);
        } else if c == '+' && stripped.is_empty() {
            stripped.push(c);
        }
    }

    if stripped.starts_with('+') {
        return stripped;
    }
    if stripped.len() == 11 && stripped.starts_with('1') {
        return format!("+{stripped}");
    }
    if stripped.len() == 10 {
        return format!("+1{stripped}");
    }
    input.to_string()
}

/// The three candidate patterns a handle lookup tries.
///
/// A handle matches if any of the three hits: a substring of the original
/// input, the exact normalized form, or a substring of the normalized form.
#[derive(Debug, Clone)]
pub struct ContactPatterns {
    /// LIKE pattern over the caller's original input.
    pub original_like: String,
    /// Exact match on the normalized form.
    pub normalized_exact: String,
    /// LIKE pattern over the normalized form.
    pub normalized_like: String,
}

impl ContactPatterns {
    /// Build the pattern set for a free-form contact string.
    ///
    /// `%` and `_` in the input are LIKE metacharacters and are passed
    /// through as such; this layer does not escape them.
    pub fn new(input: &str) -> Self {
        let normalized = normalize_contact(input);
        Self {
            original_like: format!("%{input}%"),
            normalized_exact: normalized.clone(),
            normalized_like: format!("%{normalized}%"),
        }
    }
}
