use clap::{ArgAction, Parser};

use crate::config::{DEFAULT_API_URL, DEFAULT_USER_AGENT};

/// GitHub repository search from the terminal, ten results per page,
/// with an interactive prompt for paging through results.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Search GitHub repositories and page through the results. Without --once, an interactive prompt reads queries and :next / :prev commands."
)]
pub struct Args {
    /// Query to run at startup.
    #[clap(short, long)]
    pub query: Option<String>,

    /// Page to fetch for the startup query.
    #[clap(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Print the startup query's page and exit instead of opening the prompt.
    #[clap(long, requires = "query")]
    pub once: bool,

    /// Print results as JSON instead of text.
    #[clap(long)]
    pub json: bool,

    /// Base URL of the GitHub REST API.
    #[clap(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// User-Agent header sent with every request.
    #[clap(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_interactive_on_page_one() {
        let args = Args::try_parse_from(["github-repo-search"]).unwrap();
        assert!(args.query.is_none());
        assert_eq!(args.page, 1);
        assert!(!args.once);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn parses_one_shot_query() {
        let args = Args::try_parse_from([
            "github-repo-search",
            "-q",
            "react",
            "-p",
            "3",
            "--once",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.query.as_deref(), Some("react"));
        assert_eq!(args.page, 3);
        assert!(args.once && args.json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn rejects_page_zero() {
        assert!(Args::try_parse_from(["github-repo-search", "-q", "x", "-p", "0"]).is_err());
    }

    #[test]
    fn once_requires_a_query() {
        assert!(Args::try_parse_from(["github-repo-search", "--once"]).is_err());
    }
}
