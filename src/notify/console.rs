//! Console notifier for dry runs and local development.

use async_trait::async_trait;

use crate::error::Result;
use crate::notify::Notifier;

/// Notifier that prints messages instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        println!("--- {subject} ---");
        println!("{body}");
        Ok(())
    }
}
