use crate::config::ScraperConfig;
use crate::model::{body_snippet, FetchError, ProfileStats};
use crate::parser::{parse_stats, FieldExtractor};
use crate::scraper::PageClient;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Anything that can turn a username into profile stats.
#[async_trait::async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, username: &str) -> Result<ProfileStats, FetchError>;
}

/// Fetches one profile page per call and parses it. Holds no per-user state.
pub struct ProfileStatsFetcher {
    client: Arc<dyn PageClient>,
    extractor: Arc<dyn FieldExtractor>,
    base_url: String,
    request_delay: Duration,
}

impl ProfileStatsFetcher {
    pub fn new(
        client: Arc<dyn PageClient>,
        extractor: Arc<dyn FieldExtractor>,
        cfg: &ScraperConfig,
    ) -> Self {
        Self {
            client,
            extractor,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            request_delay: cfg.request_delay(),
        }
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.base_url, username.trim().to_lowercase())
    }
}

#[async_trait::async_trait]
impl StatsSource for ProfileStatsFetcher {
    async fn fetch(&self, username: &str) -> Result<ProfileStats, FetchError> {
        let username = username.trim();
        let url = self.profile_url(username);
        debug!("Fetching stats for '{}' from {}", username, url);

        // Courtesy pause so bursts don't hammer the upstream site.
        if !self.request_delay.is_zero() {
            sleep(self.request_delay).await;
        }

        let response = match self.client.get(&url).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Fetch for '{}' failed: {}", username, e);
                return Err(e.into());
            }
        };

        match response.status {
            200 => {
                let stats = parse_stats(self.extractor.as_ref(), &response.body, &url);
                info!(
                    "Stats for '{}': solved = {}, rating = {}",
                    username, stats.total_solved, stats.contest_rating
                );
                Ok(stats)
            }
            404 => {
                warn!("Profile '{}' not found", username);
                Err(FetchError::NotFound(username.to_string()))
            }
            status => {
                warn!("Upstream returned {} for '{}'", status, username);
                Err(FetchError::Upstream {
                    status,
                    body: body_snippet(&response.body),
                })
            }
        }
    }
}
