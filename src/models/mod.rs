// src/models/mod.rs

//! Domain models for the fare watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod history;
mod offer;

// Re-export all public types
pub use config::{
    AlertConfig, AmadeusConfig, Config, FilterCriteria, HistoryConfig, HourWindow, HttpConfig,
    LoggingConfig, NotifyConfig, ProvidersConfig, SearchConfig, TequilaConfig,
};
pub use history::{CategoryPrices, PriceHistory, PriceHistoryEntry};
pub use offer::{Category, Leg, Offer, Source};
