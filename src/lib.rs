pub mod config;
pub mod error;
pub mod fetchers;
pub mod parsers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use results::Outcome;

use fetchers::PageFetcher;
use fetchers::http::HttpFetcher;
use parsers::Parser;

/// Fetches a listing page and pulls its photo URLs out of the embedded data
pub struct PhotoScraper<F = HttpFetcher> {
    config: ScraperConfig,
    fetcher: F,
}

impl PhotoScraper<HttpFetcher> {
    /// Create a scraper with the default browser profile
    pub fn new() -> Self {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a scraper that fetches over HTTP using `config`
    pub fn with_config(config: ScraperConfig) -> Self {
        let fetcher = HttpFetcher::new(&config);
        Self { config, fetcher }
    }
}

impl Default for PhotoScraper<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PageFetcher> PhotoScraper<F> {
    /// Create a scraper that gets its pages from `fetcher`
    pub fn with_fetcher(config: ScraperConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// The configuration in use
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run the whole pipeline for `url`.
    ///
    /// The URL is checked before anything is fetched. Each stage stops the
    /// run at its first error.
    pub async fn scrape(&self, url: &str) -> Result<Vec<String>, ScrapeError> {
        if !self.config.accepts(url) {
            ::log::warn!(
                "Rejecting {:?}: does not contain {}",
                url,
                self.config.required_domain
            );
            return Err(ScrapeError::InvalidUrl);
        }

        let body = self.fetcher.fetch(url).await?;
        let urls = Parser::photo_urls(&body, &self.config.data_anchor_id)?;

        ::log::info!("Extracted {} photo URLs from {}", urls.len(), url);
        Ok(urls)
    }

    /// Like [`PhotoScraper::scrape`], folding errors into the reported outcome
    pub async fn run(&self, url: &str) -> Outcome {
        self.scrape(url).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Serves one canned page (or status failure) and records what was asked for
    struct CannedFetcher {
        page: Option<String>,
        requested: RefCell<Vec<String>>,
    }

    impl CannedFetcher {
        fn page(html: &str) -> Self {
            Self {
                page: Some(html.to_string()),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn blocked() -> Self {
            Self {
                page: None,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
            self.requested.borrow_mut().push(url.to_string());
            match &self.page {
                Some(html) => Ok(html.as_bytes().to_vec()),
                None => Err(ScrapeError::Http {
                    message: format!("HTTP status client error (403 Forbidden) for url ({})", url),
                }),
            }
        }
    }

    const LISTING_URL: &str = "https://www.zillow.com/homedetails/123_zpid/";

    fn page_with(data: &str) -> String {
        format!(
            r#"<html><body><script id="__NEXT_DATA__" type="application/json">{}</script></body></html>"#,
            data
        )
    }

    fn canned_scraper(fetcher: CannedFetcher) -> PhotoScraper<CannedFetcher> {
        PhotoScraper::with_fetcher(ScraperConfig::default(), fetcher)
    }

    #[tokio::test]
    async fn test_end_to_end_single_photo() {
        let data = r#"{"props":{"pageProps":{"componentProps":{"gdpClientCache":{
            "q1":{"property":{"photos":[{"url":"https://photos.example/a.jpg"}]}}
        }}}}}"#;
        let scraper = canned_scraper(CannedFetcher::page(&page_with(data)));

        let outcome = scraper.run(LISTING_URL).await;

        assert_eq!(outcome.to_line(), r#"["https://photos.example/a.jpg"]"#);
        assert_eq!(*scraper.fetcher.requested.borrow(), vec![LISTING_URL]);
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_request() {
        let scraper = canned_scraper(CannedFetcher::page("<html></html>"));

        for url in ["https://www.redfin.com/home/1", "", "zillow .com", "ZILLOW.COM"] {
            let outcome = scraper.run(url).await;
            assert_eq!(outcome.to_line(), r#"{"error": "Invalid Zillow URL"}"#);
        }

        assert!(scraper.fetcher.requested.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_blocked_request_reports_details() {
        let scraper = canned_scraper(CannedFetcher::blocked());

        let value = scraper.run(LISTING_URL).await.to_json();

        assert!(value["error"].as_str().unwrap().starts_with("HTTP Error:"));
        assert_eq!(value["details"], "Zillow blocked request");
    }

    #[tokio::test]
    async fn test_captcha_page() {
        let scraper = canned_scraper(CannedFetcher::page(
            "<html><body><div id=\"px-captcha\"></div></body></html>",
        ));

        let outcome = scraper.run(LISTING_URL).await;
        assert_eq!(outcome.to_line(), r#"{"error": "Structure changed or CAPTCHA"}"#);
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let scraper = canned_scraper(CannedFetcher::page(&page_with("{{{")));

        let outcome = scraper.run(LISTING_URL).await;
        assert_eq!(outcome.to_line(), r#"{"error": "Failed to parse JSON data"}"#);
    }

    #[tokio::test]
    async fn test_no_photos_is_empty_array() {
        let data = r#"{"props":{"pageProps":{"componentProps":{"gdpClientCache":{
            "q1":{"notAProperty":{}}
        }}}}}"#;
        let scraper = canned_scraper(CannedFetcher::page(&page_with(data)));

        let outcome = scraper.run(LISTING_URL).await;
        assert!(!outcome.is_error());
        assert_eq!(outcome.to_line(), "[]");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_reported_as_message() {
        let data = r#"{"props":{"pageProps":{"componentProps":{"gdpClientCache":"cached-as-string"}}}}"#;
        let scraper = canned_scraper(CannedFetcher::page(&page_with(data)));

        let value = scraper.run(LISTING_URL).await.to_json();
        assert_eq!(
            value["error"],
            "expected an object at `props.pageProps.componentProps.gdpClientCache`, found string"
        );
        assert!(value.get("details").is_none());
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let data = r#"{"props":{"pageProps":{"componentProps":{"gdpClientCache":{
            "q1":{"property":{"photos":[{"url":"https://photos.example/1.jpg"}]}},
            "q2":{"property":{"photos":[{"url":"https://photos.example/2.jpg"}]}}
        }}}}}"#;
        let scraper = canned_scraper(CannedFetcher::page(&page_with(data)));

        let first = scraper.scrape(LISTING_URL).await.unwrap();
        let second = scraper.scrape(LISTING_URL).await.unwrap();

        assert_eq!(first, vec!["https://photos.example/1.jpg"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_scraper_uses_default_config() {
        let scraper: PhotoScraper = PhotoScraper::default();
        assert_eq!(scraper.config(), &ScraperConfig::default());
    }
}
