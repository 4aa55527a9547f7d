//! Local filesystem ledger implementation.
//!
//! Whole-file JSON read/write; no incremental format. Writes go through a
//! temp file and rename so a crashed run never leaves a half-written
//! ledger behind.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::PriceHistory;
use crate::storage::HistoryStore;

/// JSON file storage backend for the price ledger.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read raw bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonFileStore {
    async fn load(&self) -> Result<PriceHistory> {
        let bytes = match self.read_bytes().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::info!("No price history at {:?}; starting fresh", self.path);
                return Ok(PriceHistory::default());
            }
            Err(e) => {
                log::error!("Price history unreadable at {:?}: {}. Resetting.", self.path, e);
                return Ok(PriceHistory::default());
            }
        };

        match serde_json::from_slice::<PriceHistory>(&bytes) {
            Ok(mut history) => {
                history.normalize();
                Ok(history)
            }
            Err(e) => {
                // Corrupt JSON points at a bug; surface it loudly but keep running
                log::error!("Price history corrupt at {:?}: {}. Resetting.", self.path, e);
                Ok(PriceHistory::default())
            }
        }
    }

    async fn save(&self, history: &PriceHistory) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(history)?;
        self.write_bytes(&bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPrices, PriceHistoryEntry};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_history() -> PriceHistory {
        let prices = CategoryPrices {
            fastest: 5400,
            cheapest: 4890,
            best_one_stop: Some(5100),
        };
        PriceHistory {
            last_checked: Some("2026-08-06T06:00:00Z".parse().unwrap()),
            daily: vec![PriceHistoryEntry::new(
                NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
                &prices,
            )],
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("history.json"));

        let history = sample_history();
        store.save(&history).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn repeated_save_load_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("history.json"));

        store.save(&sample_history()).await.unwrap();
        let first = tokio::fs::read(tmp.path().join("history.json")).await.unwrap();

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();
        let second = tokio::fs::read(tmp.path().join("history.json")).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_file_loads_empty_history() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nope.json"));

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, PriceHistory::default());
    }

    #[tokio::test]
    async fn corrupt_file_resets_to_empty_history() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, PriceHistory::default());
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested/dir/history.json"));

        store.save(&sample_history()).await.unwrap();
        assert!(tmp.path().join("nested/dir/history.json").exists());
    }

    #[tokio::test]
    async fn unsorted_ledger_is_normalized_on_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        tokio::fs::write(
            &path,
            br#"{
                "lastCheckedInstant": null,
                "daily": [
                    { "date": "2026-08-07", "fastest": 1, "cheapest": 1, "bestOneStop": null },
                    { "date": "2026-08-05", "fastest": 2, "cheapest": 2, "bestOneStop": null }
                ]
            }"#,
        )
        .await
        .unwrap();

        let loaded = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(
            loaded.daily[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
        );
    }
}
