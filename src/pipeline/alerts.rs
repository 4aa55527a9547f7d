//! Drop/alert decision engine.
//!
//! Compares a run's categorized prices against the day's stored baselines
//! and produces zero or more alert events. Baselines only ever move down
//! through drop detection; the daily summary run resets them outright.
//! The engine decides, it never sends.

use crate::models::{Category, CategoryPrices, PriceHistoryEntry};

/// Which flavor of run the external trigger requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Unconditional summary notification plus a baseline reset
    DailySummary,
    /// Drop detection against the day's baselines
    RoutineCheck,
}

/// A notification decision produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    /// Daily roundup of all category prices
    Summary { prices: CategoryPrices },
    /// A category's price fell below its baseline by at least the threshold
    Drop {
        category: Category,
        old_price: u32,
        new_price: u32,
    },
}

/// Run the decision engine over today's ledger entry, mutating baselines.
pub fn decide(
    mode: RunMode,
    current: &CategoryPrices,
    entry: &mut PriceHistoryEntry,
    drop_threshold: u32,
) -> Vec<AlertEvent> {
    match mode {
        RunMode::DailySummary => {
            entry.reset(current);
            vec![AlertEvent::Summary {
                prices: current.clone(),
            }]
        }
        RunMode::RoutineCheck => {
            let mut events = Vec::new();
            for category in Category::ALL {
                let (Some(new_price), Some(baseline)) =
                    (current.get(category), entry.baseline(category))
                else {
                    continue;
                };
                if new_price <= baseline.saturating_sub(drop_threshold) {
                    events.push(AlertEvent::Drop {
                        category,
                        old_price: baseline,
                        new_price,
                    });
                    entry.set_baseline(category, new_price);
                }
            }
            events
        }
    }
}
