pub mod cache;
pub mod config;
pub mod model;
pub mod parser;
pub mod scraper;
pub mod server;
pub mod stats_fetcher;

pub use cache::CachedFetcher;
pub use config::{load_config, AppConfig};
pub use model::{FetchError, ProfileStats};
pub use stats_fetcher::{ProfileStatsFetcher, StatsSource};
