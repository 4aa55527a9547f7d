//! Price history persistence.
//!
//! The ledger is a single JSON file, read once at run start and written
//! once at run end. Missing or unreadable state degrades to an empty
//! history so a run can always proceed.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PriceHistory;

// Re-export for convenience
pub use local::JsonFileStore;

/// Trait for price history backends.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the ledger. Absent or corrupt storage yields an empty history.
    async fn load(&self) -> Result<PriceHistory>;

    /// Persist the ledger, replacing previous contents atomically.
    async fn save(&self, history: &PriceHistory) -> Result<()>;
}
