//! Offer filtering.
//!
//! Applies budget, time-window, stop-count, and airline-exclusion rules
//! uniformly across providers. The predicates are independent: an offer is
//! kept iff it passes all of them, and rule order never changes the result
//! set. Output ordering is not guaranteed; callers sort when they need to.

use crate::models::{FilterCriteria, Leg, Offer};

/// Keep the offers that satisfy every filter rule.
pub fn filter_offers(offers: &[Offer], criteria: &FilterCriteria) -> Vec<Offer> {
    offers
        .iter()
        .filter(|offer| passes(offer, criteria))
        .cloned()
        .collect()
}

fn passes(offer: &Offer, criteria: &FilterCriteria) -> bool {
    if offer.price == 0 || offer.price > criteria.max_budget {
        return false;
    }

    if criteria.excluded_airlines.contains(&offer.airline_code) {
        return false;
    }

    if let (Some(hour), Some(earliest)) = (
        offer.outbound_departure_hour(),
        criteria.earliest_outbound_hour,
    ) {
        if hour < earliest {
            return false;
        }
    }

    if let (Some(hour), Some(window)) = (offer.return_departure_hour(), criteria.return_window) {
        if !window.contains(hour) {
            return false;
        }
    }

    if let Some(max_stops) = criteria.max_stops {
        let over = |leg: &Leg| leg.stops > max_stops;
        if offer.outbound.as_ref().is_some_and(over) || offer.return_leg.as_ref().is_some_and(over)
        {
            return false;
        }
    }

    true
}
