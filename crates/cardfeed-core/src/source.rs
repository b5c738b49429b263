//! Page sources
//!
//! A [`PageSource`] turns a page number into the HTML of that listing page.
//! [`HttpPageSource`] is the production implementation.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;
use url::Url;

use crate::config::FeedConfig;
use crate::constants::http;
use crate::error::{FeedError, Result};
use crate::retry::{parse_retry_after, with_retry, RetryConfig};

/// Something that can produce listing pages
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the HTML of the given page
    async fn fetch_page(&self, page: u32) -> Result<String>;
}

/// Fetches listing pages over HTTP: `GET <base_url>?page=<n>`
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
    retry: RetryConfig,
}

impl HttpPageSource {
    /// Source with default timeout and retry behavior
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&FeedConfig {
            base_url: base_url.to_string(),
            ..FeedConfig::default()
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(http::USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        let mut base_url = Url::parse(&config.base_url)?;
        if let Some(search) = config.search_text() {
            set_query_param(&mut base_url, http::SEARCH_PARAM, search);
        }
        if let Some(sort) = config.sort {
            set_query_param(&mut base_url, http::SORT_PARAM, sort.as_str());
        }

        Ok(Self {
            client,
            base_url,
            retry: config.retry_config(),
        })
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// URL of a page. Other query parameters of the base URL are kept; an
    /// existing page parameter is replaced.
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        set_query_param(&mut url, http::PAGE_PARAM, &page.to_string());
        url
    }

    async fn fetch_once(&self, url: &Url) -> Result<String> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after);

            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                retry_after,
            });
        }

        Ok(response.text().await?)
    }
}

/// Set `key` to `value`, dropping earlier values of `key` and keeping every
/// other parameter in place
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(key, value);
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        with_retry(&self.retry, || self.fetch_once(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_on_root() {
        let source = HttpPageSource::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(source.page_url(2).as_str(), "http://127.0.0.1:5000/?page=2");
    }

    #[test]
    fn test_page_url_keeps_other_params() {
        let source = HttpPageSource::new("https://shop.example/items?sort=price&page=1").unwrap();
        assert_eq!(
            source.page_url(7).as_str(),
            "https://shop.example/items?sort=price&page=7"
        );
    }

    #[test]
    fn test_listing_filters_in_page_url() {
        let config = FeedConfig {
            base_url: "https://shop.example/seller/dashboard?q=old".into(),
            search: Some("desk lamp".into()),
            sort: Some(crate::config::SortOrder::PriceAsc),
            ..FeedConfig::default()
        };
        let source = HttpPageSource::from_config(&config).unwrap();

        assert_eq!(
            source.page_url(3).as_str(),
            "https://shop.example/seller/dashboard?q=desk+lamp&sort=price_asc&page=3"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpPageSource::new("nope"),
            Err(FeedError::Url(_))
        ));
    }
}
