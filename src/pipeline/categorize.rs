//! Offer categorization.
//!
//! Selects the fastest, cheapest, and best one-stop representatives from a
//! filtered offer set. The three selections are independent reductions over
//! the same input; one offer may win more than one category. Ties break on
//! input order (first encountered wins).

use crate::models::{Category, CategoryPrices, Offer};

/// Category winners for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorized {
    pub fastest: Offer,
    pub cheapest: Offer,
    pub best_one_stop: Option<Offer>,
}

impl Categorized {
    /// Winning offer for a category, `None` when the category is absent.
    pub fn offer_for(&self, category: Category) -> Option<&Offer> {
        match category {
            Category::Fastest => Some(&self.fastest),
            Category::Cheapest => Some(&self.cheapest),
            Category::BestOneStop => self.best_one_stop.as_ref(),
        }
    }

    /// Per-category prices fed into the ledger and the drop engine.
    pub fn prices(&self) -> CategoryPrices {
        CategoryPrices {
            fastest: self.fastest.price,
            cheapest: self.cheapest.price,
            best_one_stop: self.best_one_stop.as_ref().map(|offer| offer.price),
        }
    }
}

/// Pick the category winners, or `None` when there are no offers.
pub fn categorize(offers: &[Offer]) -> Option<Categorized> {
    // Fastest prefers non-stop outbound itineraries when any exist
    let nonstop: Vec<&Offer> = offers
        .iter()
        .filter(|offer| offer.has_nonstop_outbound())
        .collect();
    let fastest = if nonstop.is_empty() {
        offers.iter().min_by_key(|o| o.total_duration_minutes)?
    } else {
        nonstop
            .iter()
            .min_by_key(|o| o.total_duration_minutes)
            .copied()?
    };

    let cheapest = offers.iter().min_by_key(|offer| offer.price)?;

    let best_one_stop = offers
        .iter()
        .filter(|offer| offer.has_one_stop_leg())
        .min_by_key(|offer| offer.price);

    Some(Categorized {
        fastest: fastest.clone(),
        cheapest: cheapest.clone(),
        best_one_stop: best_one_stop.cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Leg, Source};
    use chrono::NaiveDate;

    fn leg(stops: u32, duration: u32) -> Leg {
        let departure = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Leg {
            departure,
            arrival: departure + chrono::Duration::minutes(duration as i64),
            duration_minutes: duration,
            stops,
        }
    }

    fn offer(id: &str, price: u32, out_stops: u32, ret_stops: u32, duration: u32) -> Offer {
        Offer {
            id: id.to_string(),
            airline: "6E".to_string(),
            airline_code: "6E".to_string(),
            price,
            refundable_price: None,
            refundable: None,
            outbound: Some(leg(out_stops, duration / 2)),
            return_leg: Some(leg(ret_stops, duration - duration / 2)),
            total_duration_minutes: duration,
            source: Source::Tequila,
        }
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(categorize(&[]).is_none());
    }

    #[test]
    fn cheapest_is_global_price_minimum() {
        let offers = vec![
            offer("a", 5200, 0, 0, 360),
            offer("b", 4800, 2, 2, 500),
            offer("c", 5900, 0, 0, 300),
        ];
        let categorized = categorize(&offers).unwrap();
        assert_eq!(categorized.cheapest.id, "b");
        assert!(offers.iter().all(|o| categorized.cheapest.price <= o.price));
    }

    #[test]
    fn fastest_prefers_nonstop_outbound_subset() {
        // The one-stop offer is faster overall, but a non-stop outbound exists
        let offers = vec![
            offer("one-stop", 4000, 1, 0, 300),
            offer("non-stop", 6000, 0, 0, 400),
        ];
        let categorized = categorize(&offers).unwrap();
        assert_eq!(categorized.fastest.id, "non-stop");
    }

    #[test]
    fn fastest_falls_back_to_all_offers() {
        let offers = vec![
            offer("slow", 4000, 1, 0, 500),
            offer("quick", 6000, 2, 1, 350),
        ];
        let categorized = categorize(&offers).unwrap();
        assert_eq!(categorized.fastest.id, "quick");
    }

    #[test]
    fn best_one_stop_counts_either_leg() {
        let offers = vec![
            offer("out", 5200, 1, 0, 400),
            offer("back", 5000, 0, 1, 420),
            offer("direct", 4800, 0, 0, 360),
        ];
        let categorized = categorize(&offers).unwrap();
        assert_eq!(categorized.best_one_stop.unwrap().id, "back");
    }

    #[test]
    fn best_one_stop_absent_when_no_one_stop_offers() {
        let offers = vec![offer("direct", 4800, 0, 0, 360), offer("hops", 4000, 2, 2, 500)];
        let categorized = categorize(&offers).unwrap();
        assert!(categorized.best_one_stop.is_none());
    }

    #[test]
    fn ties_break_on_input_order() {
        let offers = vec![
            offer("first", 5000, 0, 0, 360),
            offer("second", 5000, 0, 0, 360),
        ];
        let categorized = categorize(&offers).unwrap();
        assert_eq!(categorized.cheapest.id, "first");
        assert_eq!(categorized.fastest.id, "first");
    }

    #[test]
    fn one_offer_may_win_every_category() {
        let offers = vec![offer("solo", 5000, 1, 0, 360)];
        let categorized = categorize(&offers).unwrap();
        assert_eq!(categorized.fastest.id, "solo");
        assert_eq!(categorized.cheapest.id, "solo");
        assert_eq!(categorized.best_one_stop.unwrap().id, "solo");
    }

    #[test]
    fn prices_project_category_winners() {
        let offers = vec![
            offer("direct", 5600, 0, 0, 300),
            offer("cheap", 4800, 2, 2, 500),
        ];
        let prices = categorize(&offers).unwrap().prices();
        assert_eq!(prices.fastest, 5600);
        assert_eq!(prices.cheapest, 4800);
        assert_eq!(prices.best_one_stop, None);
    }
}
