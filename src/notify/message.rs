//! Notification message composition.
//!
//! Subjects and plain-text bodies only. The summary body lists categories
//! ascending by price for display.

use crate::models::{Category, Offer, SearchConfig};
use crate::pipeline::{AlertEvent, Categorized};

/// Compose the subject and body for one alert event.
pub fn compose(
    event: &AlertEvent,
    search: &SearchConfig,
    categorized: &Categorized,
) -> (String, String) {
    match event {
        AlertEvent::Summary { .. } => summary_message(search, categorized),
        AlertEvent::Drop {
            category,
            old_price,
            new_price,
        } => drop_message(search, categorized, *category, *old_price, *new_price),
    }
}

fn summary_message(search: &SearchConfig, categorized: &Categorized) -> (String, String) {
    let subject = format!("Daily fare summary for {}", search.route());

    let mut winners: Vec<(Category, &Offer)> = vec![
        (Category::Cheapest, &categorized.cheapest),
        (Category::Fastest, &categorized.fastest),
    ];
    if let Some(offer) = &categorized.best_one_stop {
        winners.push((Category::BestOneStop, offer));
    }
    winners.sort_by_key(|(_, offer)| offer.price);

    let mut body = format!(
        "Fares for {} departing {}",
        search.route(),
        search.depart_date
    );
    if let Some(return_date) = search.return_date {
        body.push_str(&format!(", returning {return_date}"));
    }
    body.push_str(":\n\n");

    for (category, offer) in winners {
        body.push_str(&offer_line(category, offer, &search.currency));
        body.push('\n');
    }
    if categorized.best_one_stop.is_none() {
        body.push_str("Best One-Stop Flight: no one-stop itinerary found\n");
    }

    (subject, body)
}

fn drop_message(
    search: &SearchConfig,
    categorized: &Categorized,
    category: Category,
    old_price: u32,
    new_price: u32,
) -> (String, String) {
    let currency = &search.currency;
    let subject = format!(
        "Price drop: {} now {} {}",
        category.label(),
        new_price,
        currency
    );

    let mut body = format!(
        "{} for {} dropped from {} to {} {} (down {}).\n",
        category.label(),
        search.route(),
        old_price,
        new_price,
        currency,
        old_price - new_price
    );
    if let Some(offer) = categorized.offer_for(category) {
        body.push('\n');
        body.push_str(&offer_line(category, offer, currency));
        body.push('\n');
    }

    (subject, body)
}

fn offer_line(category: Category, offer: &Offer, currency: &str) -> String {
    let mut line = format!(
        "{}: {} {} on {}",
        category.label(),
        offer.price,
        currency,
        offer.airline
    );
    if offer.airline != offer.airline_code {
        line.push_str(&format!(" ({})", offer.airline_code));
    }
    if let Some(leg) = &offer.outbound {
        line.push_str(&format!(
            ", departing {}, {}",
            leg.departure.format("%H:%M"),
            describe_stops(leg.stops)
        ));
    }
    if offer.total_duration_minutes > 0 {
        line.push_str(&format!(
            ", {} total",
            format_duration(offer.total_duration_minutes)
        ));
    }
    if let Some(refundable_price) = offer.refundable_price {
        line.push_str(&format!(", refundable ~{refundable_price} {currency}"));
    } else if offer.refundable == Some(true) {
        line.push_str(", refundable fare");
    }
    line
}

fn describe_stops(stops: u32) -> String {
    match stops {
        0 => "non-stop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours == 0 {
        format!("{rest}m")
    } else {
        format!("{hours}h {rest:02}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPrices, Leg, Source};
    use chrono::NaiveDate;

    fn offer(id: &str, price: u32, stops: u32) -> Offer {
        let departure = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(6, 25, 0)
            .unwrap();
        Offer {
            id: id.to_string(),
            airline: "IndiGo".to_string(),
            airline_code: "6E".to_string(),
            price,
            refundable_price: Some((price as f64 * 1.15).round() as u32),
            refundable: None,
            outbound: Some(Leg {
                departure,
                arrival: departure + chrono::Duration::minutes(175),
                duration_minutes: 175,
                stops,
            }),
            return_leg: None,
            total_duration_minutes: 175,
            source: Source::Tequila,
        }
    }

    fn categorized() -> Categorized {
        Categorized {
            fastest: offer("fast", 5600, 0),
            cheapest: offer("cheap", 4890, 1),
            best_one_stop: Some(offer("cheap", 4890, 1)),
        }
    }

    #[test]
    fn summary_lists_categories_ascending_by_price() {
        let event = AlertEvent::Summary {
            prices: CategoryPrices {
                fastest: 5600,
                cheapest: 4890,
                best_one_stop: Some(4890),
            },
        };
        let (subject, body) = compose(&event, &SearchConfig::default(), &categorized());

        assert_eq!(subject, "Daily fare summary for DEL-BLR");
        let cheapest_at = body.find("Cheapest Flight").unwrap();
        let fastest_at = body.find("Fastest Flight").unwrap();
        assert!(cheapest_at < fastest_at);
        assert!(body.contains("4890 INR"));
    }

    #[test]
    fn summary_notes_missing_one_stop_category() {
        let mut winners = categorized();
        winners.best_one_stop = None;
        let event = AlertEvent::Summary {
            prices: winners.prices(),
        };
        let (_, body) = compose(&event, &SearchConfig::default(), &winners);

        assert!(body.contains("no one-stop itinerary found"));
    }

    #[test]
    fn drop_message_carries_old_and_new_price() {
        let event = AlertEvent::Drop {
            category: Category::Cheapest,
            old_price: 10000,
            new_price: 9700,
        };
        let (subject, body) = compose(&event, &SearchConfig::default(), &categorized());

        assert_eq!(subject, "Price drop: Cheapest Flight now 9700 INR");
        assert!(body.contains("dropped from 10000 to 9700 INR (down 300)"));
        assert!(body.contains("IndiGo (6E)"));
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(175), "2h 55m");
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h 00m");
    }
}
