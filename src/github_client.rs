use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Result, SearchError};
use crate::repository::{Repository, SearchResponse};
use crate::search_api::{RateLimit, SearchApi};

/// Error body GitHub sends with non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Repository search against the GitHub REST API.
pub struct GitHubClient {
    client: Client,
    config: ClientConfig,
    last_rate_limit: Mutex<Option<RateLimit>>,
}

impl GitHubClient {
    /// Create a new client. No timeout is set, so reqwest's default applies.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(GitHubClient {
            client,
            config,
            last_rate_limit: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn record_rate_limit(&self, rate: RateLimit) {
        debug!("Rate limit: {}/{}", rate.remaining, rate.limit);
        if rate.is_exhausted() {
            let wait_secs = (rate.reset - Utc::now()).num_seconds().max(0);
            warn!(
                "Rate limit exhausted, resets at {} ({}s)",
                rate.reset.format("%H:%M:%S UTC"),
                wait_secs
            );
        }
        *self.last_rate_limit.lock() = Some(rate);
    }
}

#[async_trait]
impl SearchApi for GitHubClient {
    async fn search(&self, query: &str, per_page: u32, page: u32) -> Result<Vec<Repository>> {
        let url = self.config.search_url();
        debug!("Requesting {} q={:?} page={} per_page={}", url, query, page, per_page);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        if let Some(rate) = RateLimit::from_headers(response.headers()) {
            self.record_rate_limit(rate);
        }

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!("Search for {:?} page {} failed: {}", query, page, status);
            return Err(SearchError::from_status(status.as_u16(), api_message));
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected search payload for {:?} page {}: {}", query, page, e);
            SearchError::MalformedResponse(e)
        })?;

        debug!(
            "Received {} repositories for {:?} page {}",
            parsed.items.len(),
            query,
            page
        );
        Ok(parsed.items)
    }

    fn rate_limit(&self) -> Option<RateLimit> {
        *self.last_rate_limit.lock()
    }
}
