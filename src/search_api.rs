use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;

use crate::error::Result;
use crate::repository::Repository;

/// A paginated repository search backend.
///
/// The controller only ever talks to this trait, so tests can swap in a
/// scripted fake for the real HTTP client.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of repositories matching `query`.
    async fn search(&self, query: &str, per_page: u32, page: u32) -> Result<Vec<Repository>>;

    /// Last rate limit the backend reported, if it reports one.
    fn rate_limit(&self) -> Option<RateLimit> {
        None
    }
}

/// Rate limit window reported in the `X-RateLimit-*` response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    pub reset: DateTime<Utc>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_value::<u32>(headers, "X-RateLimit-Limit")?;
        let remaining = header_value::<u32>(headers, "X-RateLimit-Remaining")?;
        let reset_secs = header_value::<i64>(headers, "X-RateLimit-Reset")?;
        let reset = Utc.timestamp_opt(reset_secs, 0).single()?;
        Some(RateLimit {
            limit,
            remaining,
            reset,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
