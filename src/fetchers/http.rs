use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::fetchers::PageFetcher;
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, REFERER};
use std::time::Duration;
use url::Url;

/// Fetches listing pages over HTTP with a browser-like header set
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
    accept_language: String,
    referer: String,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher using the headers and timeout from `config`
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            referer: config.referer.clone(),
            timeout: config.timeout(),
        }
    }

    /// Build a fresh client for a single request.
    ///
    /// No cookie store is enabled, so nothing survives past the request.
    fn session(&self) -> Result<Client, ScrapeError> {
        let mut builder = Client::builder().user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(&ScraperConfig::default())
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let target = Url::parse(url).map_err(|e| ScrapeError::Http {
            message: format!("invalid URL '{}': {}", url, e),
        })?;

        ::log::debug!("GET {}", target);

        let response = self
            .session()?
            .get(target)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .header(REFERER, &self.referer)
            .send()
            .await?;

        let status = response.status();
        let response = response.error_for_status().inspect_err(|_| {
            ::log::warn!("Request for {} failed with status {}", url, status);
        })?;

        let body = response.bytes().await?;
        ::log::debug!("Fetched {} bytes ({})", body.len(), status);

        Ok(body.to_vec())
    }
}
