// src/pipeline/run.rs

//! Watch run orchestration.
//!
//! One run: load the ledger, fetch and normalize offers from both
//! providers, filter and categorize, run the decision engine against
//! today's entry, dispatch notifications, stamp and persist the ledger.
//! Degradations (failed fetch, failed notification, failed save) are
//! logged here and never abort the run; anything unexpected propagates to
//! the caller for a non-zero exit.

use chrono::{Local, NaiveDate, Utc};

use crate::error::Result;
use crate::models::{Config, FilterCriteria, Offer, PriceHistory};
use crate::notify::{Notifier, message};
use crate::pipeline::alerts::{AlertEvent, RunMode, decide};
use crate::pipeline::categorize::{Categorized, categorize};
use crate::pipeline::filter::filter_offers;
use crate::providers;
use crate::services::FlightSearcher;
use crate::storage::HistoryStore;

/// Outcome of one watch run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub offers_fetched: usize,
    pub offers_kept: usize,
    pub categorized: Option<Categorized>,
    pub events: Vec<AlertEvent>,
}

/// Filter, categorize, and decide against the ledger.
///
/// Pure with respect to I/O; `run_watch` wraps it with fetching,
/// notification, and persistence.
pub fn evaluate(
    offers: &[Offer],
    criteria: &FilterCriteria,
    drop_threshold: u32,
    mode: RunMode,
    today: NaiveDate,
    history: &mut PriceHistory,
) -> RunOutcome {
    let kept = filter_offers(offers, criteria);
    log::info!("Filter kept {}/{} offers", kept.len(), offers.len());

    let Some(categorized) = categorize(&kept) else {
        log::warn!("No offers survived filtering; skipping alert checks");
        return RunOutcome {
            offers_fetched: offers.len(),
            offers_kept: kept.len(),
            ..Default::default()
        };
    };

    let prices = categorized.prices();
    let entry = history.entry_for_or_insert(today, &prices);
    let events = decide(mode, &prices, entry, drop_threshold);

    RunOutcome {
        offers_fetched: offers.len(),
        offers_kept: kept.len(),
        categorized: Some(categorized),
        events,
    }
}

/// Run one watch pass end to end.
pub async fn run_watch(
    config: &Config,
    mode: RunMode,
    store: &dyn HistoryStore,
    notifier: Option<&dyn Notifier>,
) -> Result<RunOutcome> {
    let mut history = store.load().await?;

    let searcher = FlightSearcher::new(config)?;
    let adapters = providers::registry(&config.providers);
    let offers = searcher.fetch_offers(&adapters).await;
    log::info!(
        "Fetched {} offers from {} providers",
        offers.len(),
        adapters.len()
    );

    let today = Local::now().date_naive();
    let outcome = evaluate(
        &offers,
        &config.filter,
        config.alerts.drop_threshold,
        mode,
        today,
        &mut history,
    );

    if let Some(categorized) = &outcome.categorized {
        for event in &outcome.events {
            let (subject, body) = message::compose(event, &config.search, categorized);
            match notifier {
                Some(notifier) => {
                    if let Err(e) = notifier.notify(&subject, &body).await {
                        log::error!("Notification failed: {e}");
                    }
                }
                None => log::info!("Notifications disabled; would send: {subject}"),
            }
        }
    }

    history.last_checked = Some(Utc::now());
    if let Err(e) = store.save(&history).await {
        log::error!("Failed to persist price history: {e}");
    }

    Ok(outcome)
}
