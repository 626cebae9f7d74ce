//! Message sending through the Messages application.

use tracing::{debug, warn};

use imsg_core::error::{ImsgError, ImsgResult};

use crate::applescript;

/// Status string returned when the send script produces no output of its
/// own, which is the normal case.
const SENT: &str = "Message sent";

/// Automation handle for the Messages application.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagesApp;

impl MessagesApp {
    pub fn new() -> Self {
        Self
    }

    /// Send `text` to `recipient`, trying the iMessage service first and
    /// falling back to SMS once before surfacing the failure.
    pub async fn send_message(&self, recipient: &str, text: &str) -> ImsgResult<String> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(ImsgError::InvalidInput(
                "a recipient (phone number or email) is required to send".into(),
            ));
        }

        match applescript::run(&send_script("iMessage", recipient, text)).await {
            Ok(out) => {
                debug!(recipient, "message sent over iMessage");
                Ok(status(out))
            }
            Err(imessage_err) => {
                warn!(recipient, "iMessage send failed, retrying over SMS: {imessage_err}");
                match applescript::run(&send_script("SMS", recipient, text)).await {
                    Ok(out) => {
                        debug!(recipient, "message sent over SMS");
                        Ok(status(out))
                    }
                    Err(sms_err) => Err(ImsgError::AutomationFailure(format!(
                        "iMessage send failed ({imessage_err}); SMS fallback failed ({sms_err})"
                    ))),
                }
            }
        }
    }
}

fn status(out: String) -> String {
    if out.is_empty() {
        SENT.to_string()
    } else {
        out
    }
}

/// Build the send script for one service type.
fn send_script(service_type: &str, recipient: &str, text: &str) -> String {
    let recipient = applescript::escape(recipient);
    let text = applescript::escape(text);
    format!(
        "tell application \"Messages\"\n\
         \tset targetService to 1st account whose service type = {service_type}\n\
         \tset targetBuddy to participant \"{recipient}\" of targetService\n\
         \tsend \"{text}\" to targetBuddy\n\
         end tell"
    )
}
