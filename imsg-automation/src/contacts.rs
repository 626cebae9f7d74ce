//! Contact lookup through the Contacts application.

use tracing::debug;

use imsg_core::error::{ImsgError, ImsgResult};

use crate::applescript;

/// Automation handle for the Contacts application.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactsApp;

impl ContactsApp {
    pub fn new() -> Self {
        Self
    }

    /// Return the phone numbers of every contact whose name contains
    /// `name`, in address book order.
    pub async fn lookup_contact(&self, name: &str) -> ImsgResult<Vec<String>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ImsgError::InvalidInput(
                "a contact name is required for lookup".into(),
            ));
        }

        let out = applescript::run(&lookup_script(name)).await?;
        let numbers = parse_list(&out);
        debug!(name, count = numbers.len(), "contact lookup completed");
        Ok(numbers)
    }
}

/// Build the lookup script for one name fragment.
fn lookup_script(name: &str) -> String {
    let name = applescript::escape(name);
    format!(
        "tell application \"Contacts\"\n\
         \tset matchingPeople to (every person whose name contains \"{name}\")\n\
         \tset collected to {{}}\n\
         \trepeat with p in matchingPeople\n\
         \t\trepeat with ph in phones of p\n\
         \t\t\tset end of collected to value of ph\n\
         \t\tend repeat\n\
         \tend repeat\n\
         \treturn collected\n\
         end tell"
    )
}

/// Split the comma-separated list `osascript` prints for an AppleScript
/// list result. An empty result prints nothing.
fn parse_list(out: &str) -> Vec<String> {
    out.split(", ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
