// src/services/search.rs

//! Flight search service.
//!
//! Issues the provider searches concurrently and normalizes the raw
//! responses through the adapter registry. A failed fetch (HTTP, auth, or
//! timeout) degrades to an empty offer set; the run continues on whatever
//! the other provider returned. No retries.

use std::env;

use chrono::NaiveDate;
use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Config, Offer, Source};
use crate::providers::ProviderAdapter;
use crate::utils::http::create_client;

/// Service that runs one search against every enabled provider.
pub struct FlightSearcher {
    config: Config,
    client: Client,
}

impl FlightSearcher {
    /// Create a searcher with a client configured from the HTTP settings.
    pub fn new(config: &Config) -> Result<Self> {
        let client = create_client(&config.http)?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Fetch and normalize offers from every adapter concurrently.
    pub async fn fetch_offers(&self, adapters: &[Box<dyn ProviderAdapter>]) -> Vec<Offer> {
        let fetches = adapters
            .iter()
            .map(|adapter| self.fetch_one(adapter.as_ref()));
        join_all(fetches).await.into_iter().flatten().collect()
    }

    async fn fetch_one(&self, adapter: &dyn ProviderAdapter) -> Vec<Offer> {
        let source = adapter.source();
        match self.fetch_raw(source).await {
            Ok(raw) => {
                let offers = adapter.parse(&raw);
                log::info!("{}: {} offers", source, offers.len());
                offers
            }
            Err(e) => {
                log::warn!("{}: fetch failed, continuing without offers: {}", source, e);
                Vec::new()
            }
        }
    }

    async fn fetch_raw(&self, source: Source) -> Result<Value> {
        match source {
            Source::Amadeus => self.fetch_amadeus().await,
            Source::Tequila => self.fetch_tequila().await,
        }
    }

    async fn fetch_amadeus(&self) -> Result<Value> {
        let provider = &self.config.providers.amadeus;
        let token = api_key(&provider.api_key_env, Source::Amadeus)?;
        let search = &self.config.search;

        let mut query: Vec<(&str, String)> = vec![
            ("originLocationCode", search.origin.clone()),
            ("destinationLocationCode", search.destination.clone()),
            ("departureDate", search.depart_date.to_string()),
            ("adults", search.adults.to_string()),
            ("currencyCode", search.currency.clone()),
            ("max", provider.max_results.to_string()),
        ];
        if let Some(return_date) = search.return_date {
            query.push(("returnDate", return_date.to_string()));
        }

        let response = self
            .client
            .get(&provider.base_url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_tequila(&self) -> Result<Value> {
        let provider = &self.config.providers.tequila;
        let key = api_key(&provider.api_key_env, Source::Tequila)?;
        let search = &self.config.search;

        let depart = tequila_date(search.depart_date);
        let mut query: Vec<(&str, String)> = vec![
            ("fly_from", search.origin.clone()),
            ("fly_to", search.destination.clone()),
            ("date_from", depart.clone()),
            ("date_to", depart),
            ("adults", search.adults.to_string()),
            ("curr", search.currency.clone()),
        ];
        if let Some(return_date) = search.return_date {
            let ret = tequila_date(return_date);
            query.push(("return_from", ret.clone()));
            query.push(("return_to", ret));
        }

        let response = self
            .client
            .get(&provider.base_url)
            .header("apikey", key)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn api_key(env_var: &str, source: Source) -> Result<String> {
    env::var(env_var)
        .map_err(|_| AppError::provider(source.as_str(), format!("API key missing; set {env_var}")))
}

/// Tequila takes dd/mm/YYYY dates.
fn tequila_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
