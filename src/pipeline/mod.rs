//! Core decision pipeline for watch runs.
//!
//! - `filter`: budget/schedule/stop/airline rules
//! - `categorize`: fastest, cheapest, and best one-stop winners
//! - `alerts`: drop detection against the day's baselines
//! - `run`: orchestration of one end-to-end pass

pub mod alerts;
pub mod categorize;
pub mod filter;
pub mod run;

pub use alerts::{AlertEvent, RunMode, decide};
pub use categorize::{Categorized, categorize};
pub use filter::filter_offers;
pub use run::{RunOutcome, evaluate, run_watch};
