//! HTTP API exposing the stats fetcher.

pub mod handlers;

use crate::config::AppConfig;
use crate::stats_fetcher::StatsSource;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn StatsSource>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid CORS origin: {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(source: Arc<dyn StatsSource>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/gfg/stats", post(handlers::profile_stats))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { source })
}

/// Runs the API on an already-bound listener until the server stops.
pub async fn serve_on(
    listener: TcpListener,
    source: Arc<dyn StatsSource>,
    allowed_origins: &[String],
) -> std::io::Result<()> {
    let app = create_router(source, allowed_origins);
    axum::serve(listener, app).await
}

pub async fn serve(config: &AppConfig, source: Arc<dyn StatsSource>) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.listen_addr.as_str()).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    serve_on(listener, source, &config.allowed_origins).await
}
