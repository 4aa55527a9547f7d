//! Notification dispatch boundary.
//!
//! The core decides content; transports only carry subject+body. A run
//! must complete even with no transport configured, so construction
//! failures degrade to "notifications disabled", never to a run failure.

pub mod console;
pub mod mail;
pub mod message;

use async_trait::async_trait;

use crate::error::Result;

pub use console::ConsoleNotifier;
pub use mail::MailRelayNotifier;

/// Trait for notification sinks.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message.
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}
