//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Itinerary to watch
    #[serde(default)]
    pub search: SearchConfig,

    /// Offer filter rules
    #[serde(default)]
    pub filter: FilterCriteria,

    /// Provider endpoints and credentials
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Drop-alert behavior
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Notification transport settings
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Price history persistence settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.origin.trim().is_empty() || self.search.destination.trim().is_empty() {
            return Err(AppError::validation("search.origin/destination are required"));
        }
        if let Some(return_date) = self.search.return_date {
            if return_date < self.search.depart_date {
                return Err(AppError::validation(
                    "search.return_date must not precede search.depart_date",
                ));
            }
        }
        if self.filter.max_budget == 0 {
            return Err(AppError::validation("filter.max_budget must be > 0"));
        }
        if let Some(hour) = self.filter.earliest_outbound_hour {
            if hour >= 24 {
                return Err(AppError::validation(
                    "filter.earliest_outbound_hour must be 0-23",
                ));
            }
        }
        if let Some(window) = &self.filter.return_window {
            if window.start >= window.end || window.end > 24 {
                return Err(AppError::validation(
                    "filter.return_window must satisfy start < end <= 24",
                ));
            }
        }
        if !(0.0..1.0).contains(&self.providers.tequila.refundable_markup) {
            return Err(AppError::validation(
                "providers.tequila.refundable_markup must be in [0, 1)",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if !self.providers.amadeus.enabled && !self.providers.tequila.enabled {
            return Err(AppError::validation("no providers enabled"));
        }
        Ok(())
    }
}

/// Itinerary the watcher searches for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Origin airport IATA code
    #[serde(default = "defaults::origin")]
    pub origin: String,

    /// Destination airport IATA code
    #[serde(default = "defaults::destination")]
    pub destination: String,

    /// Outbound date
    #[serde(default = "defaults::depart_date")]
    pub depart_date: NaiveDate,

    /// Return date (omit for one-way searches)
    #[serde(default = "defaults::return_date")]
    pub return_date: Option<NaiveDate>,

    /// Passenger count
    #[serde(default = "defaults::adults")]
    pub adults: u32,

    /// Currency code for prices
    #[serde(default = "defaults::currency")]
    pub currency: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origin: defaults::origin(),
            destination: defaults::destination(),
            depart_date: defaults::depart_date(),
            return_date: defaults::return_date(),
            adults: defaults::adults(),
            currency: defaults::currency(),
        }
    }
}

impl SearchConfig {
    /// Route label used in notification subjects (e.g. "DEL-BLR").
    pub fn route(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }
}

/// Half-open local-hour window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }
}

/// Immutable per-run offer filter rules.
///
/// The optional fields cover both source profiles: a criteria set with no
/// time-window or stop constraints simply leaves them unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Maximum acceptable total price, in whole currency units
    #[serde(default = "defaults::max_budget")]
    pub max_budget: u32,

    /// Earliest acceptable outbound departure hour (inclusive, local time)
    #[serde(default)]
    pub earliest_outbound_hour: Option<u32>,

    /// Acceptable return departure hour window `[start, end)`
    #[serde(default)]
    pub return_window: Option<HourWindow>,

    /// Maximum stops per leg
    #[serde(default)]
    pub max_stops: Option<u32>,

    /// Carrier codes to exclude
    #[serde(default)]
    pub excluded_airlines: HashSet<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            max_budget: defaults::max_budget(),
            earliest_outbound_hour: None,
            return_window: None,
            max_stops: None,
            excluded_airlines: HashSet::new(),
        }
    }
}

/// Provider-specific settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub amadeus: AmadeusConfig,

    #[serde(default)]
    pub tequila: TequilaConfig,
}

/// Amadeus flight-offers search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmadeusConfig {
    /// Whether this provider is queried
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Search endpoint
    #[serde(default = "defaults::amadeus_base_url")]
    pub base_url: String,

    /// Environment variable holding the access token
    #[serde(default = "defaults::amadeus_api_key_env")]
    pub api_key_env: String,

    /// Maximum number of offers requested per search
    #[serde(default = "defaults::max_results")]
    pub max_results: u32,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            base_url: defaults::amadeus_base_url(),
            api_key_env: defaults::amadeus_api_key_env(),
            max_results: defaults::max_results(),
        }
    }
}

/// Kiwi Tequila search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TequilaConfig {
    /// Whether this provider is queried
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Search endpoint
    #[serde(default = "defaults::tequila_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "defaults::tequila_api_key_env")]
    pub api_key_env: String,

    /// Markup fraction used to estimate the refundable fare
    #[serde(default = "defaults::refundable_markup")]
    pub refundable_markup: f64,
}

impl Default for TequilaConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            base_url: defaults::tequila_base_url(),
            api_key_env: defaults::tequila_api_key_env(),
            refundable_markup: defaults::refundable_markup(),
        }
    }
}

/// Drop-alert behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Minimum price decrease that triggers a drop alert
    #[serde(default = "defaults::drop_threshold")]
    pub drop_threshold: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            drop_threshold: defaults::drop_threshold(),
        }
    }
}

/// Notification transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Whether notifications are attempted at all
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Mail relay endpoint; notifications are skipped when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Sender address
    #[serde(default = "defaults::mail_from")]
    pub from: String,

    /// Recipient address
    #[serde(default = "defaults::mail_to")]
    pub to: String,

    /// Environment variable holding the relay token
    #[serde(default = "defaults::mail_token_env")]
    pub token_env: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            endpoint: None,
            from: defaults::mail_from(),
            to: defaults::mail_to(),
            token_env: defaults::mail_token_env(),
        }
    }
}

/// Price history persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path of the JSON ledger file
    #[serde(default = "defaults::history_path")]
    pub path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: defaults::history_path(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; a timed-out fetch counts as a failed fetch
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (error, warn, info, debug, trace)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use chrono::NaiveDate;

    // Search defaults
    pub fn origin() -> String {
        "DEL".into()
    }
    pub fn destination() -> String {
        "BLR".into()
    }
    pub fn depart_date() -> NaiveDate {
        // Placeholder itinerary; real deployments set this in config.toml
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap_or_default()
    }
    pub fn return_date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 9, 8)
    }
    pub fn adults() -> u32 {
        1
    }
    pub fn currency() -> String {
        "INR".into()
    }

    // Filter defaults
    pub fn max_budget() -> u32 {
        12000
    }

    // Provider defaults
    pub fn enabled() -> bool {
        true
    }
    pub fn amadeus_base_url() -> String {
        "https://test.api.amadeus.com/v2/shopping/flight-offers".into()
    }
    pub fn amadeus_api_key_env() -> String {
        "AMADEUS_API_KEY".into()
    }
    pub fn max_results() -> u32 {
        50
    }
    pub fn tequila_base_url() -> String {
        "https://api.tequila.kiwi.com/v2/search".into()
    }
    pub fn tequila_api_key_env() -> String {
        "TEQUILA_API_KEY".into()
    }
    pub fn refundable_markup() -> f64 {
        0.15
    }

    // Alert defaults
    pub fn drop_threshold() -> u32 {
        300
    }

    // Notify defaults
    pub fn mail_from() -> String {
        "farewatch@localhost".into()
    }
    pub fn mail_to() -> String {
        "alerts@localhost".into()
    }
    pub fn mail_token_env() -> String {
        "FAREWATCH_MAIL_TOKEN".into()
    }

    // History defaults
    pub fn history_path() -> String {
        "data/price_history.json".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "farewatch/0.1".into()
    }
    pub fn timeout() -> u64 {
        20
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
