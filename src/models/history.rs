//! Price history ledger data structures.
//!
//! The ledger records one baseline price per category per calendar date.
//! Drop detection compares a run's categorized prices against these
//! baselines; the daily summary run resets them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Per-category prices produced by one categorization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPrices {
    pub fastest: u32,
    pub cheapest: u32,
    pub best_one_stop: Option<u32>,
}

impl CategoryPrices {
    /// Price for a category, `None` when the category was absent.
    pub fn get(&self, category: Category) -> Option<u32> {
        match category {
            Category::Fastest => Some(self.fastest),
            Category::Cheapest => Some(self.cheapest),
            Category::BestOneStop => self.best_one_stop,
        }
    }
}

/// Baseline prices for a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryEntry {
    /// Calendar date (provider-local) this entry covers
    pub date: NaiveDate,

    /// Baseline price of the fastest itinerary
    pub fastest: u32,

    /// Baseline price of the cheapest itinerary
    pub cheapest: u32,

    /// Baseline price of the best one-stop itinerary, absent when no
    /// one-stop offer was seen
    pub best_one_stop: Option<u32>,
}

impl PriceHistoryEntry {
    /// Create an entry from a run's categorized prices.
    pub fn new(date: NaiveDate, prices: &CategoryPrices) -> Self {
        Self {
            date,
            fastest: prices.fastest,
            cheapest: prices.cheapest,
            best_one_stop: prices.best_one_stop,
        }
    }

    /// Baseline price for a category, `None` when no baseline exists.
    pub fn baseline(&self, category: Category) -> Option<u32> {
        match category {
            Category::Fastest => Some(self.fastest),
            Category::Cheapest => Some(self.cheapest),
            Category::BestOneStop => self.best_one_stop,
        }
    }

    /// Lower a single category's baseline.
    pub fn set_baseline(&mut self, category: Category, price: u32) {
        match category {
            Category::Fastest => self.fastest = price,
            Category::Cheapest => self.cheapest = price,
            Category::BestOneStop => self.best_one_stop = Some(price),
        }
    }

    /// Unconditionally replace all baselines with the given prices.
    pub fn reset(&mut self, prices: &CategoryPrices) {
        self.fastest = prices.fastest;
        self.cheapest = prices.cheapest;
        self.best_one_stop = prices.best_one_stop;
    }
}

/// The persisted price ledger.
///
/// Loaded once at run start, mutated during the run, saved once at run end.
/// Each run owns the ledger exclusively for its duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Instant of the most recent completed run
    #[serde(rename = "lastCheckedInstant")]
    pub last_checked: Option<DateTime<Utc>>,

    /// Per-date baseline entries, ordered by date
    #[serde(default)]
    pub daily: Vec<PriceHistoryEntry>,
}

impl PriceHistory {
    /// Look up the entry for a date.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&PriceHistoryEntry> {
        self.daily.iter().find(|entry| entry.date == date)
    }

    /// Look up the entry for a date, creating it from the given prices when
    /// absent. A freshly created entry is the day's baseline.
    pub fn entry_for_or_insert(
        &mut self,
        date: NaiveDate,
        prices: &CategoryPrices,
    ) -> &mut PriceHistoryEntry {
        match self.daily.binary_search_by_key(&date, |entry| entry.date) {
            Ok(idx) => &mut self.daily[idx],
            Err(idx) => {
                self.daily.insert(idx, PriceHistoryEntry::new(date, prices));
                &mut self.daily[idx]
            }
        }
    }

    /// Restore the ordered-by-date invariant after loading external data.
    pub fn normalize(&mut self) {
        self.daily.sort_by_key(|entry| entry.date);
    }
}
