//! External automation boundary for the Messages and Contacts applications.
//!
//! Each collaborator is modeled as a synchronous call/response process
//! invocation: a scripted command goes out through `osascript`, and a
//! status string or an `AutomationFailure` comes back. No state is held
//! between calls, and the send path retries once over SMS before a failure
//! surfaces.

pub mod applescript;
pub mod contacts;
pub mod messages;

pub use contacts::ContactsApp;
pub use messages::MessagesApp;
