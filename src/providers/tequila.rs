//! Kiwi Tequila search adapter.
//!
//! Reads the `data` array of the Tequila search response. Route items carry
//! `local_departure`/`local_arrival` timestamps that are local wall-clock
//! times despite their `Z` suffix; the suffix is stripped, not converted.
//! Tequila exposes no refundability flag, so the refundable fare is
//! estimated from a configured markup fraction.

use chrono::NaiveDateTime;
use serde_json::Value;

use super::ProviderAdapter;
use crate::models::{Leg, Offer, Source};

/// Adapter for the Kiwi Tequila search response.
#[derive(Debug, Clone)]
pub struct TequilaAdapter {
    refundable_markup: f64,
}

impl TequilaAdapter {
    pub fn new(refundable_markup: f64) -> Self {
        Self { refundable_markup }
    }
}

impl ProviderAdapter for TequilaAdapter {
    fn source(&self) -> Source {
        Source::Tequila
    }

    fn parse(&self, raw: &Value) -> Vec<Offer> {
        let Some(items) = raw.get("data").and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                let offer = parse_record(item, self.refundable_markup);
                if offer.is_none() {
                    log::debug!("tequila: dropping malformed record #{idx}");
                }
                offer
            })
            .collect()
    }
}

fn parse_record(item: &Value, refundable_markup: f64) -> Option<Offer> {
    let id = match item.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let price = item.get("price").and_then(Value::as_f64)?;
    if price < 0.0 {
        return None;
    }
    let price = price.round() as u32;
    let refundable_price = (price as f64 * (1.0 + refundable_markup)).round() as u32;

    let code = item
        .pointer("/airlines/0")
        .and_then(Value::as_str)?
        .to_string();

    let route = item.get("route").and_then(Value::as_array)?;
    let outbound_items: Vec<&Value> = route.iter().filter(|r| leg_marker(r) == Some(0)).collect();
    let return_items: Vec<&Value> = route.iter().filter(|r| leg_marker(r) == Some(1)).collect();

    let outbound = parse_leg(&outbound_items, duration_minutes(item, "departure"))?;
    let return_leg = parse_leg(&return_items, duration_minutes(item, "return"));

    let total_duration_minutes = Offer::leg_duration_sum(Some(&outbound), return_leg.as_ref());

    Some(Offer {
        id: format!("tequila-{id}"),
        // Tequila carries carrier codes only; the code doubles as the name
        airline: code.clone(),
        airline_code: code,
        price,
        refundable_price: Some(refundable_price),
        refundable: None,
        outbound: Some(outbound),
        return_leg,
        total_duration_minutes,
        source: Source::Tequila,
    })
}

/// The `return` marker is 0 on outbound route items and 1 on return items.
fn leg_marker(route_item: &Value) -> Option<u64> {
    route_item.get("return").and_then(Value::as_u64)
}

/// `duration.departure` and `duration.return` are seconds.
fn duration_minutes(item: &Value, key: &str) -> Option<u32> {
    let seconds = item.pointer(&format!("/duration/{key}"))?.as_u64()?;
    u32::try_from(seconds / 60).ok()
}

fn parse_leg(route_items: &[&Value], duration: Option<u32>) -> Option<Leg> {
    let first = route_items.first()?;
    let last = route_items.last()?;

    let departure = parse_local_time(first.get("local_departure")?.as_str()?)?;
    let arrival = parse_local_time(last.get("local_arrival")?.as_str()?)?;

    let duration_minutes = duration.or_else(|| {
        let elapsed = (arrival - departure).num_minutes();
        u32::try_from(elapsed).ok()
    })?;

    Some(Leg {
        departure,
        arrival,
        duration_minutes,
        stops: (route_items.len() - 1) as u32,
    })
}

/// `local_departure` looks like `2026-09-01T06:25:00.000Z` but is local
/// wall-clock time; strip the misleading `Z` instead of converting.
fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f").ok()
}
