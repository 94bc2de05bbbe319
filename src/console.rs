//! Line-based interactive front end.
//!
//! Each input line is a query or a `:command`. Controls that the view would
//! disable (previous on page 1, paging with no results) are refused here and
//! never reach the controller.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::controller::{SearchController, SearchState};
use crate::notifier::{MemoryNotifier, Notifier};
use crate::search_api::{RateLimit, SearchApi};
use crate::view;

pub const HELP: &str = "\
Type a query and press Enter to search from page 1.
  <Enter>        search again with the current query
  :n, :next      next page
  :p, :prev      previous page
  :h, :help      show this help
  :q, :quit      exit";

const NOTHING_TO_PAGE: &str = "Search for something first.";
const ON_FIRST_PAGE: &str = "Already on the first page.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New query text, searched from page 1.
    Query(String),
    /// Search again with the current query.
    Submit,
    Next,
    Previous,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.trim() {
        "" if line.is_empty() => Command::Submit,
        ":n" | ":next" => Command::Next,
        ":p" | ":prev" | ":previous" => Command::Previous,
        ":h" | ":help" => Command::Help,
        ":q" | ":quit" => Command::Quit,
        _ => Command::Query(line.to_string()),
    }
}

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Refresh,
    Help,
    Stay,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct Console<A> {
    controller: SearchController<A, Arc<MemoryNotifier>>,
    notices: Arc<MemoryNotifier>,
    format: OutputFormat,
}

impl<A: SearchApi> Console<A> {
    pub fn new(api: A, format: OutputFormat) -> Self {
        let notices = Arc::new(MemoryNotifier::new());
        Console {
            controller: SearchController::new(api, Arc::clone(&notices)),
            notices,
            format,
        }
    }

    pub fn controller(&self) -> &SearchController<A, Arc<MemoryNotifier>> {
        &self.controller
    }

    pub fn take_notices(&self) -> Vec<String> {
        self.notices.drain()
    }

    /// Run the startup search for `query` at `page`.
    pub async fn search(&self, query: &str, page: u32) {
        self.controller.set_query(query);
        self.with_spinner(self.controller.search(None, Some(page)))
            .await;
    }

    pub async fn handle(&self, command: Command) -> Flow {
        let state = self.controller.state();
        match command {
            Command::Query(text) => {
                self.controller.set_query(text);
                self.with_spinner(self.controller.trigger_search()).await;
                Flow::Refresh
            }
            Command::Submit => {
                self.with_spinner(self.controller.trigger_search()).await;
                Flow::Refresh
            }
            Command::Next if !state.show_pagination() => self.refuse(NOTHING_TO_PAGE),
            Command::Previous if !state.show_pagination() => self.refuse(NOTHING_TO_PAGE),
            Command::Previous if !state.previous_enabled() => self.refuse(ON_FIRST_PAGE),
            Command::Next => {
                self.with_spinner(self.controller.go_to_page(1)).await;
                Flow::Refresh
            }
            Command::Previous => {
                self.with_spinner(self.controller.go_to_page(-1)).await;
                Flow::Refresh
            }
            Command::Help => Flow::Help,
            Command::Quit => Flow::Quit,
        }
    }

    fn refuse(&self, notice: &str) -> Flow {
        debug!("Refusing disabled control: {}", notice);
        self.notices.notify(notice);
        Flow::Stay
    }

    /// Drive a controller operation, ticking a spinner while it reports
    /// loading.
    async fn with_spinner<F: Future<Output = ()>>(&self, operation: F) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        spinner.set_message(view::LOADING_TEXT);

        tokio::pin!(operation);
        let mut ticker = interval(Duration::from_millis(80));
        loop {
            tokio::select! {
                _ = &mut operation => break,
                _ = ticker.tick() => {
                    if self.controller.is_loading() {
                        spinner.tick();
                    }
                }
            }
        }
        spinner.finish_and_clear();
    }

    /// Render the current results for stdout.
    pub fn render(&self) -> String {
        let state = self.controller.state();
        match self.format {
            OutputFormat::Json => view::render_json(&state.results).unwrap_or_else(|e| {
                self.notices.notify(&format!("Could not encode results: {}", e));
                String::new()
            }),
            OutputFormat::Text => {
                let body = view::render_results(&state);
                let status = status_line(&state, self.controller.api().rate_limit());
                if body.is_empty() {
                    status
                } else {
                    format!("{}\n\n{}", body, status)
                }
            }
        }
    }

    fn print_notices(&self) {
        for notice in self.take_notices() {
            eprintln!("! {}", notice);
        }
    }

    /// Read commands from stdin until `:quit` or end of input.
    pub async fn run(&self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        prompt()?;

        while let Some(line) = lines.next_line().await? {
            match self.handle(parse_command(&line)).await {
                Flow::Quit => break,
                Flow::Help => println!("{}", HELP),
                Flow::Refresh => {
                    self.print_notices();
                    println!("{}", self.render());
                }
                Flow::Stay => {}
            }
            self.print_notices();
            prompt()?;
        }
        Ok(())
    }

    /// Print the current page once, for non-interactive use. Returns the
    /// notices raised along the way.
    pub fn print_once(&self) -> Vec<String> {
        let notices = self.take_notices();
        for notice in &notices {
            eprintln!("! {}", notice);
        }
        println!("{}", self.render());
        notices
    }
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "search> ")?;
    stdout.flush()
}

/// Page, result count and the last reported rate limit.
pub fn status_line(state: &SearchState, rate: Option<RateLimit>) -> String {
    let mut line = format!(
        "[{:?}] page {} · {} result{}",
        state.query,
        state.page,
        state.results.len(),
        if state.results.len() == 1 { "" } else { "s" }
    );
    if let Some(rate) = rate {
        line.push_str(&format!(" · rate limit {}/{}", rate.remaining, rate.limit));
        if rate.is_exhausted() {
            line.push_str(&format!(" (resets {})", rate.reset.format("%H:%M:%S UTC")));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::repository::{Owner, Repository};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;

    fn repo(id: u64) -> Repository {
        let at = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        Repository {
            id,
            full_name: format!("octo/repo-{}", id),
            html_url: format!("https://github.com/octo/repo-{}", id),
            owner: Owner {
                login: "octo".into(),
                avatar_url: "https://avatars.example/octo".into(),
            },
            topics: vec![],
            description: None,
            created_at: at,
            updated_at: at,
        }
    }

    /// Returns `page_len` repositories for every page, recording the pages.
    struct PagedApi {
        page_len: usize,
        pages: Mutex<Vec<u32>>,
    }

    impl PagedApi {
        fn new(page_len: usize) -> Self {
            PagedApi {
                page_len,
                pages: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchApi for PagedApi {
        async fn search(&self, _query: &str, _per_page: u32, page: u32) -> Result<Vec<Repository>> {
            self.pages.lock().push(page);
            let first = u64::from(page) * 100;
            Ok((first..first + self.page_len as u64).map(repo).collect())
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(""), Command::Submit);
        assert_eq!(parse_command("\n"), Command::Submit);
        assert_eq!(parse_command(":n"), Command::Next);
        assert_eq!(parse_command(":prev"), Command::Previous);
        assert_eq!(parse_command(":help"), Command::Help);
        assert_eq!(parse_command(":q\r\n"), Command::Quit);
        assert_eq!(parse_command("tokio runtime"), Command::Query("tokio runtime".into()));
        assert_eq!(parse_command("   "), Command::Query("   ".into()));
    }

    #[tokio::test]
    async fn query_then_paging() {
        let console = Console::new(PagedApi::new(3), OutputFormat::Text);

        assert_eq!(console.handle(Command::Query("react".into())).await, Flow::Refresh);
        assert_eq!(console.controller().page(), 1);

        assert_eq!(console.handle(Command::Next).await, Flow::Refresh);
        assert_eq!(console.controller().page(), 2);

        assert_eq!(console.handle(Command::Previous).await, Flow::Refresh);
        assert_eq!(console.controller().page(), 1);
        assert_eq!(*console.controller().api().pages.lock(), vec![1, 2, 1]);
        assert!(console.take_notices().is_empty());
    }

    #[tokio::test]
    async fn previous_on_first_page_is_refused() {
        let console = Console::new(PagedApi::new(3), OutputFormat::Text);
        console.handle(Command::Query("react".into())).await;

        assert_eq!(console.handle(Command::Previous).await, Flow::Stay);
        assert_eq!(console.take_notices(), vec![ON_FIRST_PAGE]);
        assert_eq!(console.controller().api().pages.lock().len(), 1);
    }

    #[tokio::test]
    async fn paging_without_results_is_refused() {
        let console = Console::new(PagedApi::new(0), OutputFormat::Text);
        console.handle(Command::Query("nothing".into())).await;

        assert_eq!(console.handle(Command::Next).await, Flow::Stay);
        assert_eq!(console.take_notices(), vec![NOTHING_TO_PAGE]);
        assert_eq!(console.render(), "[\"nothing\"] page 1 · 0 results");
    }

    #[tokio::test]
    async fn empty_submit_reports_notice() {
        let console = Console::new(PagedApi::new(3), OutputFormat::Text);
        assert_eq!(console.handle(Command::Submit).await, Flow::Refresh);
        assert_eq!(console.take_notices(), vec!["Please enter a search term."]);
        assert!(console.controller().api().pages.lock().is_empty());
    }

    #[tokio::test]
    async fn startup_search_honours_page() {
        let console = Console::new(PagedApi::new(1), OutputFormat::Json);
        console.search("serde", 4).await;

        assert_eq!(console.controller().page(), 4);
        let value: serde_json::Value = serde_json::from_str(&console.render()).unwrap();
        assert_eq!(value[0]["full_name"], "octo/repo-400");
    }

    #[test]
    fn status_line_includes_rate_limit() {
        let state = SearchState {
            query: "rust".into(),
            page: 3,
            loading: false,
            results: vec![repo(1)],
        };
        let rate = RateLimit {
            limit: 10,
            remaining: 0,
            reset: Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap(),
        };
        assert_eq!(
            status_line(&state, Some(rate)),
            "[\"rust\"] page 3 · 1 result · rate limit 0/10 (resets 12:30:00 UTC)"
        );
    }
}
