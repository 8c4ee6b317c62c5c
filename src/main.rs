//! Site-Harvest main entry point
//!
//! This is the command-line interface for crawling a single site and
//! printing its text and contact emails as JSON.

use clap::Parser;
use site_harvest::config::{
    load_profile_with_hash, CrawlConfig, CrawlProfile, CrawlRequest, MAX_DEPTH_LIMIT,
    MAX_PAGES_LIMIT,
};
use site_harvest::crawler::run_crawl;
use site_harvest::output::{write_report, CrawlReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Site-Harvest: a single-site content and contact crawler
///
/// Crawls one website breadth-first from URL, staying on its host, and
/// prints the cleaned page text and email addresses it found as JSON.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version)]
#[command(about = "Crawl a website and extract its text and contact emails", long_about = None)]
struct Cli {
    /// URL to crawl; https:// is assumed when the scheme is missing
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum link depth from the seed
    #[arg(
        short,
        long,
        env = "CRAWL_MAX_DEPTH",
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH_LIMIT as i64)
    )]
    depth: u32,

    /// Maximum number of pages to crawl
    #[arg(
        short,
        long,
        env = "CRAWL_MAX_PAGES",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=MAX_PAGES_LIMIT as i64)
    )]
    max_pages: u32,

    /// Write the JSON result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML crawl profile
    #[arg(short, long, value_name = "PROFILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let profile = match load_profile(cli.config.as_deref()) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to load profile: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = CrawlRequest::new(cli.url.clone())
        .with_max_depth(cli.depth)
        .with_max_pages(cli.max_pages);

    let config = match CrawlConfig::new(&request, &profile) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid crawl request: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (report, code) = match run_crawl(config).await {
        Ok(report) => (report, ExitCode::SUCCESS),
        Err(e) if e.is_crawl_reported() => {
            tracing::warn!("{}", e);
            (CrawlReport::from_error(&e), ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            (CrawlReport::from_error(&e), ExitCode::FAILURE)
        }
    };

    if let Err(e) = write_report(&report, cli.output.as_deref()) {
        tracing::error!("Failed to write results: {}", e);
        return ExitCode::FAILURE;
    }
    if let Some(path) = &cli.output {
        eprintln!("Results saved to {}", path.display());
    }

    code
}

/// Loads the profile at `path`, or the defaults when none is given
fn load_profile(path: Option<&Path>) -> site_harvest::ConfigResult<CrawlProfile> {
    let Some(path) = path else {
        return Ok(CrawlProfile::default());
    };
    tracing::info!("Loading profile from: {}", path.display());
    let (profile, hash) = load_profile_with_hash(path)?;
    tracing::info!("Profile loaded successfully (hash: {})", hash);
    Ok(profile)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON result.
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("site_harvest=info,warn"),
        1 => EnvFilter::new("site_harvest=debug,info"),
        2 => EnvFilter::new("site_harvest=trace,debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
