//! Client configuration
//!
//! Loads configuration from environment variables with sensible defaults.
//! The shell layers command-line flags on top through the builder methods.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default backend base URL (the Django dev server)
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default number of articles per list page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Default lifetime of a transient alert
pub const DEFAULT_ALERT_TTL: Duration = Duration::from_secs(3);

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// Articles per list page; always at least 1
    pub page_size: u64,
    /// How long an alert stays visible before dismissing itself
    pub alert_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            alert_ttl: DEFAULT_ALERT_TTL,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `CONDUIT_API_URL`: API base URL
    /// - `CONDUIT_PAGE_SIZE`: articles per page
    /// - `CONDUIT_ALERT_TTL_MS`: alert lifetime in milliseconds
    ///
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("CONDUIT_API_URL").unwrap_or(defaults.api_url),
            page_size: env::var("CONDUIT_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.page_size),
            alert_ttl: env::var("CONDUIT_ALERT_TTL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.alert_ttl, Duration::from_millis),
        }
        .normalized()
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.normalized()
    }

    /// Override the page size (clamped to at least 1)
    #[must_use]
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self.normalized()
    }

    /// Override the alert lifetime
    #[must_use]
    pub const fn with_alert_ttl(mut self, alert_ttl: Duration) -> Self {
        self.alert_ttl = alert_ttl;
        self
    }

    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        let trimmed = self.api_url.trim_end_matches('/').len();
        self.api_url.truncate(trimmed);
        self
    }
}
