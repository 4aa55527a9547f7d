//! Normalized flight offer data structures.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Flight-search provider that produced an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Amadeus,
    Tequila,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Amadeus => "amadeus",
            Source::Tequila => "tequila",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One direction of travel within an offer.
///
/// Departure and arrival are provider-local wall-clock times; hour-based
/// filter rules apply to these, not to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Local departure time
    pub departure: NaiveDateTime,

    /// Local arrival time
    pub arrival: NaiveDateTime,

    /// Total leg duration in minutes
    pub duration_minutes: u32,

    /// Number of intermediate stops (0 = non-stop)
    pub stops: u32,
}

/// A normalized flight itinerary candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Opaque identifier, unique per provider and run
    pub id: String,

    /// Carrier display name (falls back to the raw code when unknown)
    pub airline: String,

    /// IATA carrier code
    pub airline_code: String,

    /// Total price in whole currency units
    pub price: u32,

    /// Estimated refundable fare, present only when the provider models
    /// refundability as a markup over the base price
    pub refundable_price: Option<u32>,

    /// Explicit refundability flag, present only when the provider exposes one
    pub refundable: Option<bool>,

    /// Outbound leg (absent for providers outside round-trip scope)
    pub outbound: Option<Leg>,

    /// Return leg
    pub return_leg: Option<Leg>,

    /// Sum of the durations of the present legs, in minutes
    pub total_duration_minutes: u32,

    /// Provider that produced this offer
    pub source: Source,
}

impl Offer {
    /// Local departure hour of the outbound leg, if present.
    pub fn outbound_departure_hour(&self) -> Option<u32> {
        self.outbound.as_ref().map(|leg| leg.departure.hour())
    }

    /// Local departure hour of the return leg, if present.
    pub fn return_departure_hour(&self) -> Option<u32> {
        self.return_leg.as_ref().map(|leg| leg.departure.hour())
    }

    /// Whether the outbound leg exists and is non-stop.
    pub fn has_nonstop_outbound(&self) -> bool {
        self.outbound.as_ref().is_some_and(|leg| leg.stops == 0)
    }

    /// Whether either leg has exactly one stop.
    pub fn has_one_stop_leg(&self) -> bool {
        self.outbound.as_ref().is_some_and(|leg| leg.stops == 1)
            || self.return_leg.as_ref().is_some_and(|leg| leg.stops == 1)
    }

    /// Sum of leg durations for the legs that are present.
    pub fn leg_duration_sum(outbound: Option<&Leg>, return_leg: Option<&Leg>) -> u32 {
        outbound.map_or(0, |leg| leg.duration_minutes)
            + return_leg.map_or(0, |leg| leg.duration_minutes)
    }
}

/// Offer category tracked by the price ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Fastest,
    Cheapest,
    BestOneStop,
}

impl Category {
    /// All categories, in ledger order.
    pub const ALL: [Category; 3] = [Category::Fastest, Category::Cheapest, Category::BestOneStop];

    /// Human-readable label used in notification subjects.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Fastest => "Fastest Flight",
            Category::Cheapest => "Cheapest Flight",
            Category::BestOneStop => "Best One-Stop Flight",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn leg(hour: u32, stops: u32) -> Leg {
        let departure = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap();
        Leg {
            departure,
            arrival: departure + chrono::Duration::minutes(95),
            duration_minutes: 95,
            stops,
        }
    }

    fn offer(outbound: Option<Leg>, return_leg: Option<Leg>) -> Offer {
        let total = Offer::leg_duration_sum(outbound.as_ref(), return_leg.as_ref());
        Offer {
            id: "test-1".to_string(),
            airline: "IndiGo".to_string(),
            airline_code: "6E".to_string(),
            price: 5000,
            refundable_price: None,
            refundable: None,
            outbound,
            return_leg,
            total_duration_minutes: total,
            source: Source::Tequila,
        }
    }

    #[test]
    fn departure_hours_follow_legs() {
        let o = offer(Some(leg(6, 0)), Some(leg(19, 1)));
        assert_eq!(o.outbound_departure_hour(), Some(6));
        assert_eq!(o.return_departure_hour(), Some(19));

        let one_way = offer(Some(leg(6, 0)), None);
        assert_eq!(one_way.return_departure_hour(), None);
    }

    #[test]
    fn one_stop_on_either_leg_counts() {
        assert!(offer(Some(leg(6, 1)), Some(leg(19, 0))).has_one_stop_leg());
        assert!(offer(Some(leg(6, 0)), Some(leg(19, 1))).has_one_stop_leg());
        assert!(!offer(Some(leg(6, 0)), Some(leg(19, 2))).has_one_stop_leg());
        assert!(!offer(None, None).has_one_stop_leg());
    }

    #[test]
    fn duration_sum_tolerates_missing_legs() {
        assert_eq!(
            Offer::leg_duration_sum(Some(&leg(6, 0)), Some(&leg(19, 0))),
            190
        );
        assert_eq!(Offer::leg_duration_sum(Some(&leg(6, 0)), None), 95);
        assert_eq!(Offer::leg_duration_sum(None, None), 0);
    }
}
