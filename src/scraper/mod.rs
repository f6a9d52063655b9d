// Outbound fetching of profile pages

pub mod fetcher;
pub mod traits;

pub use fetcher::HttpPageClient;
pub use traits::PageClient;
