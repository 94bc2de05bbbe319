use std::fmt::Write;

use crate::controller::SearchState;
use crate::repository::Repository;

pub const LOADING_TEXT: &str = "Loading...";

/// Render one repository card.
pub fn render_repository(repo: &Repository) -> String {
    let topics = if repo.topics.is_empty() {
        "No topics".to_string()
    } else {
        repo.topics.join(", ")
    };
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No Description");

    let mut out = String::new();
    let _ = writeln!(out, "{}  <{}>", repo.full_name, repo.html_url);
    let _ = writeln!(out, "  Owner: {} ({})", repo.owner.login, repo.owner.avatar_url);
    let _ = writeln!(out, "  Topics: {}", topics);
    let _ = writeln!(out, "  Description: {}", description);
    let _ = write!(
        out,
        "  Created at: {}  Updated at: {}",
        repo.created_at.format("%Y-%m-%d"),
        repo.updated_at.format("%Y-%m-%d")
    );
    out
}

/// Pagination bar; "Previous" is marked disabled on the first page.
pub fn render_pagination(state: &SearchState) -> String {
    let previous = if state.previous_enabled() {
        "< Previous (:p)"
    } else {
        "< Previous (disabled)"
    };
    format!("{}  |  Page {}  |  Next (:n) >", previous, state.page)
}

/// Render the results region for the current state.
///
/// While loading, only the loading indicator is shown. The pagination bar
/// appears only when there is at least one result.
pub fn render_results(state: &SearchState) -> String {
    if state.loading {
        return LOADING_TEXT.to_string();
    }

    let mut out = state
        .results
        .iter()
        .map(render_repository)
        .collect::<Vec<_>>()
        .join("\n\n");

    if state.show_pagination() {
        out.push_str("\n\n");
        out.push_str(&render_pagination(state));
    }
    out
}

pub fn render_json(results: &[Repository]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
