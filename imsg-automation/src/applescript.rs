//! Thin wrapper around `osascript` invocation.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use imsg_core::error::{ImsgError, ImsgResult};

/// Escape a string for embedding inside an AppleScript double-quoted
/// literal.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Run an AppleScript source via `osascript -e` and return trimmed stdout.
///
/// A launch failure or non-zero exit maps to `AutomationFailure` carrying
/// the process stderr; there is no structured error payload on this
/// boundary, only raw text.
pub async fn run(script: &str) -> ImsgResult<String> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ImsgError::AutomationFailure(format!("failed to launch osascript: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ImsgError::AutomationFailure(stderr.trim().to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(bytes = stdout.len(), "osascript completed");
    Ok(stdout)
}
