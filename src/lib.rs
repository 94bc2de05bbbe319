//! # GitHub Repository Search
//!
//! A small client for the GitHub repository search API: type a query, get a
//! page of ten repositories, page forwards and back.
//!
//! ## Main Components
//!
//! - [`SearchController`]: query, page, loading flag and result set, plus
//!   the operations that change them
//! - [`SearchApi`]: the search backend seam, implemented by [`GitHubClient`]
//! - [`Notifier`]: where user-facing notices go
//! - [`Console`]: the interactive terminal front end
//!
//! ## Example
//!
//! ```no_run
//! use github_repo_search_lib::{ClientConfig, GitHubClient, SearchController, TracingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GitHubClient::new(ClientConfig::default())?;
//!     let controller = SearchController::new(client, TracingNotifier);
//!
//!     controller.set_query("rust async");
//!     controller.trigger_search().await;
//!     controller.go_to_page(1).await;
//!
//!     for repo in controller.results() {
//!         println!("{} {}", repo.full_name, repo.html_url);
//!     }
//!     Ok(())
//! }
//! ```

mod args;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
mod github_client;
pub mod logging;
pub mod notifier;
pub mod repository;
pub mod search_api;
pub mod view;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::config::ClientConfig;
pub use crate::console::{Console, OutputFormat};
pub use crate::controller::{SearchController, SearchState, PAGE_SIZE};
pub use crate::error::{Result, SearchError};
pub use crate::github_client::GitHubClient;
pub use crate::notifier::{MemoryNotifier, Notifier, TracingNotifier};
pub use crate::repository::{Owner, Repository};
pub use crate::search_api::{RateLimit, SearchApi};
