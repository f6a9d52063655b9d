use crate::model::{PageResponse, TransportError};

/// Outbound HTTP capability: one GET, any status comes back as a response.
#[async_trait::async_trait]
pub trait PageClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<PageResponse, TransportError>;
}
