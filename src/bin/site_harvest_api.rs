//! Site-Harvest HTTP service entry point

use anyhow::{Context, Result};
use clap::Parser;
use site_harvest::config::{load_profile_with_hash, CrawlProfile};
use site_harvest::server::{create_router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// HTTP API that crawls a site and returns its text and contact emails
#[derive(Parser, Debug)]
#[command(name = "site-harvest-api")]
#[command(version)]
struct ApiCli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Host address to bind
    #[arg(long, env = "SITE_HARVEST_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Optional TOML profile applied to every crawl
    #[arg(long, value_name = "PROFILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ApiCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("site_harvest=info,tower_http=info,warn")),
        )
        .with_target(false)
        .init();

    let state = match &cli.config {
        Some(path) => {
            let (profile, hash) = load_profile_with_hash(path)
                .with_context(|| format!("failed to load profile {}", path.display()))?;
            tracing::info!("Loaded profile {} (hash: {})", path.display(), hash);
            AppState::new(profile).with_profile_hash(hash)
        }
        None => AppState::new(CrawlProfile::default()),
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("site-harvest-api listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("server shutdown")?;
    Ok(())
}
