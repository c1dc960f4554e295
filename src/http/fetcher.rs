use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::error::ScrapeError;
use crate::http::headers::{browser_user_agent, to_header_map};
use crate::http::log_middleware::LogMiddleware;
use crate::model::page::RawPage;

/// Fetch-by-URL capability returning raw markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, headers: &HashMap<String, String>) -> Result<RawPage, ScrapeError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str, headers: &HashMap<String, String>) -> Result<RawPage, ScrapeError> {
        (**self).fetch(url, headers).await
    }
}

#[derive(Clone, Debug)]
pub struct FetcherConfig {
    pub user_agent: Option<String>,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            user_agent: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`PageFetcher`] backed by reqwest.
pub struct HttpFetcher {
    client: ClientWithMiddleware,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, ScrapeError> {
        let user_agent = config.user_agent.clone().unwrap_or_else(browser_user_agent);
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|e| ScrapeError::InvalidHeader {
                name: USER_AGENT.to_string(),
                reason: e.to_string(),
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::Config(format!("cannot build HTTP client: {}", e)))?;

        let client = ClientBuilder::new(client).with(LogMiddleware).build();
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &HashMap<String, String>) -> Result<RawPage, ScrapeError> {
        let response = self
            .client
            .get(url)
            .headers(to_header_map(headers)?)
            .send()
            .await
            .map_err(|e| ScrapeError::network(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| ScrapeError::network(url, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::network(url, e))?;

        Ok(RawPage::new(url, body))
    }
}
