pub mod cache;
pub mod http_client;
pub mod market_api;

pub use cache::PriceHistoryCache;
pub use http_client::{RateLimitClient, RetryPolicy};
pub use market_api::MarketApiClient;
