use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset, from the number of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "github_repo_search_lib=warn,github_repo_search=warn",
        1 => "github_repo_search_lib=info,github_repo_search=info",
        2 => "github_repo_search_lib=debug,github_repo_search=debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// results on stdout.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert!(default_directive(0).contains("=warn"));
        assert!(default_directive(1).contains("=info"));
        assert!(default_directive(2).contains("=debug"));
        assert_eq!(default_directive(7), "trace");
    }

    #[test]
    fn directives_parse() {
        for v in 0..4 {
            assert!(default_directive(v).parse::<EnvFilter>().is_ok());
        }
    }
}
