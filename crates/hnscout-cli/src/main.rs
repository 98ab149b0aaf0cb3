use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hnscout_core::Post;
use hnscout_storage::{MemoryPostStore, PgPostStore, PostStore};
use hnscout_sync::{ScrapeConfig, ScrapePipeline, ScrapeRun};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hnscout")]
#[command(about = "Scrape the Hacker News front page into Postgres")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the listing page once, store new posts and the run's usage record
    Scrape {
        /// Print the collected posts as JSON
        #[arg(long)]
        json: bool,
        /// Keep everything in memory instead of writing to the database
        #[arg(long)]
        dry_run: bool,
        /// Override HNSCOUT_MAX_ENTRIES for this run
        #[arg(short = 'n', long)]
        max_entries: Option<usize>,
    },
    /// Apply database migrations
    Migrate,
    /// Print the HTTP status of the listing page
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ScrapeConfig::from_env();

    match cli.command.unwrap_or(Commands::Scrape {
        json: false,
        dry_run: false,
        max_entries: None,
    }) {
        Commands::Scrape {
            json,
            dry_run,
            max_entries,
        } => {
            if let Some(max_entries) = max_entries {
                config.max_entries = max_entries;
            }
            let store: Arc<dyn PostStore> = if dry_run {
                Arc::new(MemoryPostStore::new())
            } else {
                Arc::new(
                    PgPostStore::connect(&config.database_url)
                        .await
                        .context("connecting to the post database")?,
                )
            };
            let run = ScrapePipeline::from_config(&config, store)?
                .run_once()
                .await
                .context("scrape run failed")?;

            if json {
                print_posts(&run.posts)?;
            }
            print_summary(&run);
        }
        Commands::Migrate => {
            let store = PgPostStore::connect(&config.database_url)
                .await
                .context("connecting to the post database")?;
            store.migrate().await.context("applying migrations")?;
            info!("migrations applied");
        }
        Commands::Check => {
            let status = config
                .http_fetcher()?
                .probe_status(&config.listing_url)
                .await
                .with_context(|| format!("requesting {}", config.listing_url))?;
            println!("{} {}", status, config.listing_url);
            if !(200..300).contains(&status) {
                anyhow::bail!("listing page returned http status {status}");
            }
        }
    }

    Ok(())
}

fn print_posts(posts: &[Post]) -> Result<()> {
    let json = serde_json::to_string_pretty(posts).context("serializing posts")?;
    println!("{json}");
    Ok(())
}

fn print_summary(run: &ScrapeRun) {
    let usage = &run.usage;
    println!(
        "scrape complete: run_id={} posts={} more_than_five_words={} five_words_or_less={} bytes={} duration={:?} avg_per_post={:?}",
        run.run_id,
        usage.total_posts,
        usage.total_posts_with_more_than_five_words,
        usage.total_posts_with_five_or_fewer_words,
        usage.total_bytes_scraped,
        usage.duration,
        usage.average_time_per_post
    );
}
