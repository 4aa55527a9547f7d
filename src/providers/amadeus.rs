//! Amadeus flight-offers adapter.
//!
//! Reads the `data` array of the flight-offers search response. Carrier
//! display names come from the payload's `dictionaries.carriers` map;
//! unknown codes pass through unchanged. Amadeus models refundability as an
//! explicit `pricingOptions.refundableFare` flag.

use chrono::NaiveDateTime;
use serde_json::Value;

use super::ProviderAdapter;
use crate::models::{Leg, Offer, Source};

/// Adapter for the Amadeus flight-offers search response.
#[derive(Debug, Default, Clone)]
pub struct AmadeusAdapter;

impl AmadeusAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderAdapter for AmadeusAdapter {
    fn source(&self) -> Source {
        Source::Amadeus
    }

    fn parse(&self, raw: &Value) -> Vec<Offer> {
        let Some(items) = raw.get("data").and_then(Value::as_array) else {
            return Vec::new();
        };
        let carriers = raw.pointer("/dictionaries/carriers");

        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                let offer = parse_record(item, carriers);
                if offer.is_none() {
                    log::debug!("amadeus: dropping malformed record #{idx}");
                }
                offer
            })
            .collect()
    }
}

fn parse_record(item: &Value, carriers: Option<&Value>) -> Option<Offer> {
    let id = item.get("id").and_then(Value::as_str)?;
    let price = parse_price(item.pointer("/price/grandTotal")?)?;

    let itineraries = item.get("itineraries").and_then(Value::as_array)?;
    let outbound = itineraries.first().and_then(parse_itinerary)?;
    let return_leg = itineraries.get(1).and_then(parse_itinerary);

    // Validating carrier when present, else the first marketing carrier
    let code = item
        .pointer("/validatingAirlineCodes/0")
        .and_then(Value::as_str)
        .or_else(|| {
            item.pointer("/itineraries/0/segments/0/carrierCode")
                .and_then(Value::as_str)
        })?
        .to_string();
    let airline = carriers
        .and_then(|map| map.get(&code))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| code.clone());

    let refundable = item
        .pointer("/pricingOptions/refundableFare")
        .and_then(Value::as_bool);

    let total_duration_minutes = Offer::leg_duration_sum(Some(&outbound), return_leg.as_ref());

    Some(Offer {
        id: format!("amadeus-{id}"),
        airline,
        airline_code: code,
        price,
        refundable_price: None,
        refundable,
        outbound: Some(outbound),
        return_leg,
        total_duration_minutes,
        source: Source::Amadeus,
    })
}

/// `price.grandTotal` is a decimal string like `"5400.00"`.
fn parse_price(value: &Value) -> Option<u32> {
    let total: f64 = match value {
        Value::String(s) => s.parse().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    if total < 0.0 {
        return None;
    }
    Some(total.round() as u32)
}

fn parse_itinerary(itinerary: &Value) -> Option<Leg> {
    let segments = itinerary.get("segments").and_then(Value::as_array)?;
    let first = segments.first()?;
    let last = segments.last()?;

    let departure = parse_local_time(first.pointer("/departure/at")?.as_str()?)?;
    let arrival = parse_local_time(last.pointer("/arrival/at")?.as_str()?)?;

    // Wall-clock fallback when the duration field is missing
    let duration_minutes = itinerary
        .get("duration")
        .and_then(Value::as_str)
        .and_then(parse_iso_duration_minutes)
        .or_else(|| elapsed_minutes(departure, arrival))?;

    Some(Leg {
        departure,
        arrival,
        duration_minutes,
        stops: (segments.len() - 1) as u32,
    })
}

/// Segment timestamps are local wall-clock times without an offset.
fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Parse an ISO-8601 duration such as `PT2H55M` or `P1DT3H10M` into minutes.
fn parse_iso_duration_minutes(s: &str) -> Option<u32> {
    let rest = s.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let mut minutes: u32 = 0;
    if !date_part.is_empty() {
        let days: u32 = date_part.strip_suffix('D')?.parse().ok()?;
        minutes += days * 24 * 60;
    }

    let mut number = String::new();
    for ch in time_part.chars() {
        if ch.is_ascii_digit() {
            number.push(ch);
            continue;
        }
        let value: u32 = number.parse().ok()?;
        number.clear();
        match ch {
            'H' => minutes += value * 60,
            'M' => minutes += value,
            'S' => {}
            _ => return None,
        }
    }

    Some(minutes)
}

fn elapsed_minutes(departure: NaiveDateTime, arrival: NaiveDateTime) -> Option<u32> {
    let elapsed = (arrival - departure).num_minutes();
    u32::try_from(elapsed).ok()
}
