use crate::modules::listing::domain::Listing;
use crate::modules::market::domain::entities::{PricePoint, ScrapeOutcome, ServerInfo, TopItem};
use crate::modules::market::domain::value_objects::ListingQuery;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Backend that stores scraped listings and runs ingestion jobs.
///
/// Implementations return listings already filtered by name and server;
/// bucket filtering happens on the read side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn listings(&self, query: &ListingQuery) -> AppResult<Vec<Listing>>;

    async fn servers(&self) -> AppResult<Vec<ServerInfo>>;

    /// Ranked by count, highest first
    async fn top_items(&self) -> AppResult<Vec<TopItem>>;

    /// Ascending by date
    async fn price_history(&self, item_name: &str) -> AppResult<Vec<PricePoint>>;

    /// Long-running; not retried. A failed job is `AppError::ScrapeFailed`.
    async fn trigger_scrape(&self, query: &str, server: &str) -> AppResult<ScrapeOutcome>;
}
