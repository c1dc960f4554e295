use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use course_scraper::config::catalog::{queens_catalog, select_faculties};
use course_scraper::config::env::SupabaseConfig;
use course_scraper::core::catalog_scraper::{CatalogScraper, ScrapeOptions};
use course_scraper::http::fetcher::{FetcherConfig, HttpFetcher};
use course_scraper::sink::RecordSink;
use course_scraper::sink::csv_sink::{CsvSink, DEFAULT_CSV_PATH};
use course_scraper::sink::supabase_sink::SupabaseSink;

#[derive(Parser)]
#[command(name = "course_scraper", about = "Scrape the Queen's academic calendar into CSV and Supabase")]
struct Cli {
    /// Where to write the CSV export
    #[arg(short, long, default_value = DEFAULT_CSV_PATH)]
    output: PathBuf,

    /// Only write the CSV, skip the database insert
    #[arg(long)]
    no_db: bool,

    /// Stop at the first page that cannot be fetched
    #[arg(long)]
    fail_fast: bool,

    /// Listing pages fetched concurrently within a faculty
    #[arg(short, long, default_value = "1")]
    concurrency: usize,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Only scrape these faculties (repeatable, e.g. --faculty Nursing)
    #[arg(short, long)]
    faculty: Vec<String>,
}

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let catalog = select_faculties(queens_catalog(), &cli.faculty);
    if catalog.is_empty() {
        anyhow::bail!("no faculty matches {:?}", cli.faculty);
    }

    let timeout = Duration::from_secs(cli.timeout);
    let mut sinks: Vec<Box<dyn RecordSink>> = vec![Box::new(CsvSink::new(&cli.output))];
    if !cli.no_db {
        let config = SupabaseConfig::from_env()?;
        sinks.push(Box::new(SupabaseSink::new(&config, timeout)?));
    }

    let fetcher = HttpFetcher::new(&FetcherConfig {
        timeout,
        ..FetcherConfig::default()
    })?;
    let options = ScrapeOptions {
        concurrency: cli.concurrency,
        fail_fast: cli.fail_fast,
        ..ScrapeOptions::default()
    };
    let scraper = CatalogScraper::new(fetcher, options)?;
    let report = scraper.run(&catalog).await?;

    for sink in &sinks {
        let written = sink.write(&report.records).await?;
        if !written.failed.is_empty() {
            log::warn!(
                "{} rejected {} courses: {}",
                sink.name(),
                written.failed.len(),
                written.failed.join(", ")
            );
        }
    }

    if !report.failed_pages.is_empty() {
        log::warn!("{} pages could not be fetched:", report.failed_pages.len());
        for failure in &report.failed_pages {
            log::warn!("  {}: {}", failure.url, failure.reason);
        }
    }
    log::info!("Course data scraping and insertion completed");
    Ok(())
}
