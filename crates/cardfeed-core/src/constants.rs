//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// HTTP client configuration
pub mod http {
    use super::*;

    /// Default listing endpoint
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

    /// Per-request timeout; bounds how long the loading guard can stay held
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Query parameter carrying the page number
    pub const PAGE_PARAM: &str = "page";

    /// Query parameter carrying the search text
    pub const SEARCH_PARAM: &str = "q";

    /// Query parameter carrying the sort order
    pub const SORT_PARAM: &str = "sort";

    /// User agent sent with page requests
    pub const USER_AGENT: &str = concat!("cardfeed/", env!("CARGO_PKG_VERSION"));
}

/// Infinite scroll configuration
pub mod scroll {
    /// Distance from the bottom (in surface units) that triggers the next fetch
    pub const THRESHOLD: u32 = 200;

    /// Page assumed to be rendered before any scrolling happens
    pub const DEFAULT_START_PAGE: u32 = 1;

    /// Indicator text while a page is loading
    pub const LOADING_MESSAGE: &str = "Loading more products...";

    /// Indicator text once the server returns an empty page
    pub const END_MESSAGE: &str = "No more products";

    /// Indicator text after a failed fetch
    pub const FAILURE_MESSAGE: &str = "Could not load more products, scroll to retry";
}

/// Clock configuration
pub mod clock {
    use super::*;

    /// Refresh interval of the datetime display
    pub const INTERVAL: Duration = Duration::from_millis(1000);
}

/// Selectors of the listing page elements
pub mod selectors {
    pub const CARD: &str = ".inventory-card";
    pub const CONTAINER: &str = ".content";
    pub const GRID: &str = "#inventoryGrid";
    pub const LOADING: &str = "#loading";
    pub const DATETIME: &str = "#datetime";
}

/// Filesystem layout
pub mod paths {
    /// Config directory name
    pub const CONFIG_DIR_NAME: &str = ".cardfeed";

    /// Config file name
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Logs subdirectory name
    pub const LOGS_DIR_NAME: &str = "logs";
}
