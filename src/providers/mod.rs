//! Provider adapters that normalize raw search responses into offers.
//!
//! Each adapter owns its provider's field-path mapping and date parsing.
//! Adapters are pure transforms: a malformed record is dropped, never an
//! error, and an absent top-level container yields an empty result.

pub mod amadeus;
pub mod tequila;

use serde_json::Value;

pub use amadeus::AmadeusAdapter;
pub use tequila::TequilaAdapter;

use crate::models::{Offer, ProvidersConfig, Source};

/// Plugin interface for flight-search providers.
pub trait ProviderAdapter: Send + Sync {
    /// Provider this adapter speaks for.
    fn source(&self) -> Source;

    /// Normalize a raw payload into offers, dropping malformed records.
    fn parse(&self, raw: &Value) -> Vec<Offer>;
}

/// Build the adapter registry for the enabled providers.
pub fn registry(config: &ProvidersConfig) -> Vec<Box<dyn ProviderAdapter>> {
    let mut adapters: Vec<Box<dyn ProviderAdapter>> = Vec::new();
    if config.amadeus.enabled {
        adapters.push(Box::new(AmadeusAdapter::new()));
    }
    if config.tequila.enabled {
        adapters.push(Box::new(TequilaAdapter::new(config.tequila.refundable_markup)));
    }
    adapters
}
