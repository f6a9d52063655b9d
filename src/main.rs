use gfg_stats::config::{load_config, AppConfig};
use gfg_stats::parser::TextPatternExtractor;
use gfg_stats::scraper::HttpPageClient;
use gfg_stats::server;
use gfg_stats::{CachedFetcher, ProfileStatsFetcher, StatsSource};

use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "GFG_STATS_CONFIG";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| "config.json".to_string());

    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match HttpPageClient::new(&config.scraper) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = ProfileStatsFetcher::new(
        Arc::new(client),
        Arc::new(TextPatternExtractor::new()),
        &config.scraper,
    );

    let source: Arc<dyn StatsSource> = if config.cache.enabled() {
        info!(
            "Caching stats for {}s (up to {} users)",
            config.cache.ttl_seconds, config.cache.max_entries
        );
        Arc::new(CachedFetcher::new(fetcher, config.cache.ttl(), config.cache.max_entries))
    } else {
        Arc::new(fetcher)
    };

    info!(
        "Scraping {} with {}s timeout, {}ms delay",
        config.scraper.base_url, config.scraper.timeout_seconds, config.scraper.request_delay_ms
    );

    if let Err(e) = server::serve(&config, source).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
