mod config;
mod fetch;
mod listing;
mod parser;
mod record;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use config::{Config, FallbackYear};
use fetch::Fetcher;
use record::HackathonRecord;

#[derive(Parser)]
#[command(
    name = "hackathon_scraper",
    about = "Extract structured hackathon records from Хакатоны.рус-style pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a listing page and extract a record per linked event page
    Run {
        /// Listing page: URL or path to a local HTML file
        input: String,
        /// Output JSON path
        #[arg(short, long, default_value = "parsed_hackathons.json")]
        output: PathBuf,
        /// Max pages to process (default: all discovered)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Pause between pages, milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
        /// Year assumed for dates that carry no year anywhere
        #[arg(long, value_enum, default_value = "current")]
        fallback_year: FallbackYear,
    },
    /// Parse a single event page and print its record as JSON
    Page {
        url: String,
        #[arg(long, value_enum, default_value = "current")]
        fallback_year: FallbackYear,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            limit,
            delay_ms,
            fallback_year,
        } => run(&input, &output, limit, delay_ms, Config { fallback_year }).await,
        Commands::Page { url, fallback_year } => {
            let fetcher = Fetcher::new()?;
            let html = fetcher.fetch_page(&url).await?;
            let record = parser::parse_page(&html, &url, &Config { fallback_year });
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
    }
}

async fn run(
    input: &str,
    output: &std::path::Path,
    limit: Option<usize>,
    delay_ms: u64,
    cfg: Config,
) -> Result<()> {
    let fetcher = Fetcher::new()?;

    let listing_html = if std::path::Path::new(input).exists() {
        std::fs::read_to_string(input)?
    } else {
        fetcher.fetch_page(input).await?
    };

    let mut links = listing::discover_links(&listing_html);
    if let Some(n) = limit {
        links.truncate(n);
    }
    if links.is_empty() {
        println!("No hackathon links found on the listing page.");
        return Ok(());
    }

    println!("Found {} hackathon pages. Starting detailed parsing...", links.len());
    let pb = ProgressBar::new(links.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut records: Vec<HackathonRecord> = Vec::new();
    let mut skipped = 0usize;

    for url in &links {
        match process_page(&fetcher, url, &cfg).await {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
        // Pacing between pages to avoid overloading the source server.
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        pb.inc(1);
    }
    pb.finish_and_clear();

    record::write_records(output, &records)?;
    println!(
        "Parsed {} hackathons ({} skipped). Results saved to {}",
        records.len(),
        skipped,
        output.display()
    );
    Ok(())
}

/// Fetch and extract one page. Any failure is logged and yields None; a bad
/// page never aborts the run.
async fn process_page(fetcher: &Fetcher, url: &str, cfg: &Config) -> Option<HackathonRecord> {
    if !url.starts_with("http") {
        warn!("Skipping non-absolute link: {}", url);
        return None;
    }

    let html = match fetcher.fetch_page(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Error fetching {}: {}", url, e);
            return None;
        }
    };

    let record = parser::parse_page(&html, url, cfg);
    if record.name.is_none() {
        warn!("Skipping {} - failed to extract a name from the page", url);
        return None;
    }
    Some(record)
}
