use crate::config::ScraperConfig;
use crate::model::{PageResponse, TransportError};
use crate::scraper::traits::PageClient;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;

/// reqwest-backed `PageClient` that presents itself as a desktop browser.
#[derive(Clone)]
pub struct HttpPageClient {
    client: Client,
}

impl HttpPageClient {
    pub fn new(cfg: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .default_headers(browser_headers())
            .timeout(cfg.timeout())
            .build()?;

        Ok(Self { client })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Other(err.to_string())
    }
}

#[async_trait::async_trait]
impl PageClient for HttpPageClient {
    async fn get(&self, url: &str) -> Result<PageResponse, TransportError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(PageResponse { status, body })
    }
}
