use std::sync::Arc;

use clap::{Parser, Subcommand};
use scout::api::create_router;
use scout::config::Config;
use scout::discovery::GoogleSearchClient;
use scout::extraction::JinaReaderClient;
use scout::{Aggregator, SearchOptions};

#[derive(Parser)]
#[command(name = "scout", about = "Search the web and scrape the top hits")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one search and print the result as JSON
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
        /// Per-page extraction timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Serve POST /api/search
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let mut aggregator = Aggregator::new(
        GoogleSearchClient::new(config.google.clone())?,
        JinaReaderClient::new(config.jina.clone())?,
    );
    if let Some(max) = config.max_concurrent_extractions {
        aggregator = aggregator.with_max_concurrent_extractions(max);
    }

    match cli.command {
        Command::Search {
            query,
            limit,
            timeout,
        } => {
            let options = SearchOptions {
                timeout_seconds: timeout,
                limit,
            };
            let res = aggregator.search(&query, &options).await?;
            println!("{}", serde_json::to_string_pretty(&res)?);
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or(config.bind_addr);
            let app = create_router(Arc::new(aggregator));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("listening on {addr}");
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
