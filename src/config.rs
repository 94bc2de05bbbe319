use reqwest::Url;

use crate::error::{Result, SearchError};
use crate::Args;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("github-repo-search/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP search client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let user_agent = user_agent.into();

        let parsed = Url::parse(&base_url)
            .map_err(|e| SearchError::Config(format!("API URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "API URL '{}' must use http or https",
                base_url
            )));
        }
        if user_agent.trim().is_empty() {
            return Err(SearchError::Config("User-Agent must not be empty".into()));
        }

        Ok(ClientConfig {
            base_url,
            user_agent,
        })
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        ClientConfig::new(args.api_url.as_str(), args.user_agent.as_str())
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Result<Self> {
        ClientConfig::new(base_url, self.user_agent)
    }

    pub fn search_url(&self) -> String {
        format!("{}/search/repositories", self.base_url)
    }
}
