use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a photo scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent sent with the page request (a desktop browser)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header value
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Referer header value, the site's homepage
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Substring a listing URL must contain to be fetched at all
    #[serde(default = "default_required_domain")]
    pub required_domain: String,

    /// `id` of the script element holding the embedded page data
    #[serde(default = "default_data_anchor_id")]
    pub data_anchor_id: String,

    /// Request timeout in seconds (no timeout when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36".to_string()
}

/// Default value for accept_language
fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

/// Default value for referer
fn default_referer() -> String {
    "https://www.zillow.com/".to_string()
}

/// Default value for required_domain
fn default_required_domain() -> String {
    "zillow.com".to_string()
}

/// Default value for data_anchor_id
fn default_data_anchor_id() -> String {
    "__NEXT_DATA__".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            referer: default_referer(),
            required_domain: default_required_domain(),
            data_anchor_id: default_data_anchor_id(),
            timeout_secs: None,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Whether `url` names the target site
    pub fn accepts(&self, url: &str) -> bool {
        url.contains(&self.required_domain)
    }
}
