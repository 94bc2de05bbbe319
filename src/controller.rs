//! Query and pagination state for a repository search view.
//!
//! [`SearchController`] owns the query text, the current page, the loading
//! flag and the current result set. The view reads snapshots through
//! [`SearchController::state`] and mutates only through the operations
//! here.
//!
//! State lives behind a mutex that is never held across an await, so a
//! view polling [`SearchController::is_loading`] sees the flag while a
//! request is in flight. When searches overlap, only the most recently
//! dispatched one is applied; earlier responses are dropped on arrival.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::notifier::Notifier;
use crate::repository::Repository;
use crate::search_api::SearchApi;

/// Results requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Snapshot of everything the view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub page: u32,
    pub loading: bool,
    pub results: Vec<Repository>,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState {
            query: String::new(),
            page: 1,
            loading: false,
            results: Vec::new(),
        }
    }
}

impl SearchState {
    /// The primary search trigger is disabled for an empty query or while a
    /// request is in flight.
    pub fn search_enabled(&self) -> bool {
        !self.query.is_empty() && !self.loading
    }

    pub fn previous_enabled(&self) -> bool {
        self.page > 1
    }

    pub fn show_pagination(&self) -> bool {
        !self.results.is_empty()
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: SearchState,
    /// Token of the most recently dispatched request.
    latest_request: u64,
}

/// Clears the loading flag when the request it was issued for finishes,
/// however it finishes.
struct LoadingGuard<'a> {
    inner: &'a Mutex<Inner>,
    token: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if inner.latest_request == self.token {
            inner.state.loading = false;
        }
    }
}

pub struct SearchController<A, N> {
    api: A,
    notifier: N,
    inner: Mutex<Inner>,
}

impl<A: SearchApi, N: Notifier> SearchController<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        SearchController {
            api,
            notifier,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> SearchState {
        self.inner.lock().state.clone()
    }

    pub fn query(&self) -> String {
        self.inner.lock().state.query.clone()
    }

    pub fn page(&self) -> u32 {
        self.inner.lock().state.page
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().state.loading
    }

    pub fn results(&self) -> Vec<Repository> {
        self.inner.lock().state.results.clone()
    }

    /// Replace the query text, as typed into the input.
    pub fn set_query(&self, text: impl Into<String>) {
        self.inner.lock().state.query = text.into();
    }

    /// Search from page 1 with the current query.
    pub async fn trigger_search(&self) {
        self.search(None, None).await
    }

    /// Move `delta` pages from the current one, keeping the current query.
    /// A move that would land below page 1 is ignored.
    pub async fn go_to_page(&self, delta: i64) {
        let current = self.page();
        let next = i64::from(current)
            .checked_add(delta)
            .and_then(|n| u32::try_from(n).ok());
        let next = match next {
            Some(next) if next >= 1 => next,
            _ => {
                debug!("Ignoring move from page {} by {}", current, delta);
                return;
            }
        };
        self.search(None, Some(next)).await
    }

    /// Fetch a page of results.
    ///
    /// `query` defaults to the stored query (and does not replace it);
    /// `page` defaults to 1. A blank query only produces a notice. On
    /// success the result set is replaced and the page moves to the one
    /// fetched; on failure both are left alone and the error message is
    /// passed to the notifier.
    pub async fn search(&self, query: Option<&str>, page: Option<u32>) {
        let query = match query {
            Some(q) => q.to_string(),
            None => self.query(),
        };
        if query.trim().is_empty() {
            self.notifier.notify(&SearchError::EmptyQuery.to_string());
            return;
        }
        let page = page.unwrap_or(1).max(1);

        let token = {
            let mut inner = self.inner.lock();
            inner.latest_request += 1;
            inner.state.loading = true;
            inner.latest_request
        };
        let _loading = LoadingGuard {
            inner: &self.inner,
            token,
        };

        info!("Searching {:?} page {}", query, page);
        let outcome = self.api.search(&query, PAGE_SIZE, page).await;

        let mut inner = self.inner.lock();
        if inner.latest_request != token {
            debug!(
                "Dropping response for {:?} page {}: superseded by request {}",
                query, page, inner.latest_request
            );
            return;
        }

        match outcome {
            Ok(items) => {
                debug!("Showing {} repositories on page {}", items.len(), page);
                inner.state.results = items;
                inner.state.page = page;
            }
            Err(err) => {
                drop(inner);
                warn!("Search for {:?} page {} failed: {}", query, page, err);
                self.notifier.notify(&err.to_string());
            }
        }
    }
}
