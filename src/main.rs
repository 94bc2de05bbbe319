use std::error::Error;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

use github_repo_search_lib::{logging, Args, ClientConfig, Console, GitHubClient, OutputFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match ClientConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    info!("Using search endpoint {}", config.search_url());

    let client = GitHubClient::new(config)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let console = Console::new(client, format);

    if let Some(query) = &args.query {
        console.search(query, args.page).await;
        let notices = console.print_once();
        if args.once {
            if notices.is_empty() {
                return Ok(());
            }
            return Err(notices.join("; ").into());
        }
    }

    console.run().await?;
    info!("Goodbye");
    Ok(())
}
