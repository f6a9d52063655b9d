use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub request_delay_ms: u64,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.geeksforgeeks.org/user".into(),
            timeout_seconds: 5,
            request_delay_ms: 500,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// 0 disables caching.
    pub ttl_seconds: u64,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 0,
            max_entries: 128,
        }
    }
}

impl CacheConfig {
    pub fn enabled(&self) -> bool {
        self.ttl_seconds > 0 && self.max_entries > 0
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub listen_addr: String,
    pub allowed_origins: Vec<String>,
    pub scraper: ScraperConfig,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            allowed_origins: vec![
                "http://localhost:5173".into(),
                "http://localhost:5174".into(),
            ],
            scraper: ScraperConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Loads the JSON config at `path`. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("gfg-stats-{}-{}.json", name, std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config("/nonexistent/gfg-stats/config.json").unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
        assert_eq!(cfg.scraper.timeout_seconds, 5);
        assert_eq!(cfg.scraper.request_delay_ms, 500);
        assert!(!cfg.cache.enabled());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = write_temp(
            "partial",
            r#"{ "scraper": { "timeout_seconds": 3 }, "cache": { "ttl_seconds": 60 } }"#,
        );
        let cfg = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(cfg.scraper.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.scraper.base_url, "https://www.geeksforgeeks.org/user");
        assert!(cfg.cache.enabled());
        assert_eq!(cfg.cache.max_entries, 128);
        assert_eq!(cfg.allowed_origins.len(), 2);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = write_temp("malformed", "{ not json");
        let result = load_config(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
