pub mod application;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{DashboardSnapshot, MarketService, RefreshOutcome, ScanResult};
pub use domain::{ListingQuery, MarketDataSource, PricePoint, ScrapeOutcome, ServerInfo, TopItem};
pub use infrastructure::MarketApiClient;
