//! Configuration file
//!
//! `~/.cardfeed/config.toml`, every key optional:
//!
//! ```toml
//! base_url = "http://127.0.0.1:5000/"
//! start_page = 1
//! threshold = 200
//! clock_interval_ms = 1000
//! request_timeout_secs = 10
//! card_selector = ".inventory-card"
//! end_message = "No more products"
//! search = "lamp"
//! sort = "price_asc"
//!
//! [retry]
//! max_retries = 2
//! initial_delay_ms = 250
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::constants::{clock, http, scroll, selectors};
use crate::error::{FeedError, Result};
use crate::retry::RetryConfig;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Listing endpoint; the page number is added as a query parameter
    pub base_url: String,
    /// Page already rendered before any scrolling
    pub start_page: u32,
    /// Distance from the bottom that triggers the next fetch
    pub threshold: u32,
    pub clock_interval_ms: u64,
    pub request_timeout_secs: u64,
    /// CSS selector of card elements in listing pages
    pub card_selector: String,
    /// Indicator text once the listing is exhausted
    pub end_message: String,
    /// Indicator text after a failed fetch
    pub failure_message: String,
    /// Search text sent as `q` with every page request
    pub search: Option<String>,
    /// Sort order sent as `sort` with every page request
    pub sort: Option<SortOrder>,
    pub retry: RetrySettings,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: http::DEFAULT_BASE_URL.to_string(),
            start_page: scroll::DEFAULT_START_PAGE,
            threshold: scroll::THRESHOLD,
            clock_interval_ms: clock::INTERVAL.as_millis() as u64,
            request_timeout_secs: http::REQUEST_TIMEOUT.as_secs(),
            card_selector: selectors::CARD.to_string(),
            end_message: scroll::END_MESSAGE.to_string(),
            failure_message: scroll::FAILURE_MESSAGE.to_string(),
            search: None,
            sort: None,
            retry: RetrySettings::default(),
        }
    }
}

/// Listing order understood by the server's `sort` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::DateAsc,
        SortOrder::DateDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::NameAsc => "name_asc",
            SortOrder::NameDesc => "name_desc",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::DateAsc => "date_asc",
            SortOrder::DateDesc => "date_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| FeedError::Config(format!("unknown sort order: {s}")))
    }
}

/// `[retry]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        RetryConfig::default().into()
    }
}

impl From<RetryConfig> for RetrySettings {
    fn from(config: RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay_ms: config.initial_delay.as_millis() as u64,
            max_delay_ms: config.max_delay.as_millis() as u64,
            jitter: config.jitter,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            jitter: settings.jitter,
        }
    }
}

impl FeedConfig {
    /// Parse a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|e| FeedError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load a config file, falling back to defaults when it is missing or
    /// invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.start_page == 0 {
            return Err(FeedError::Config("start_page must be at least 1".into()));
        }
        if self.clock_interval_ms == 0 {
            return Err(FeedError::Config(
                "clock_interval_ms must be greater than 0".into(),
            ));
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::from(&self.retry)
    }

    /// Search text worth sending; blank text means no search
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
