/// Scripted `MarketDataSource` whose responses can be delayed per item filter,
/// used to reproduce out-of-order responses.
use async_trait::async_trait;
use pazar_lib::modules::listing::Listing;
use pazar_lib::modules::market::{
    ListingQuery, MarketDataSource, PricePoint, ScrapeOutcome, ServerInfo, TopItem,
};
use pazar_lib::shared::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
struct Script {
    delay: Duration,
    response: AppResult<Vec<Listing>>,
}

#[derive(Default)]
pub struct FakeMarketSource {
    scripts: Mutex<HashMap<Option<String>, Script>>,
    top_items: Mutex<Vec<TopItem>>,
    histories: Mutex<HashMap<String, Vec<PricePoint>>>,
    history_delay: Mutex<HashMap<String, Duration>>,
    scrape: Mutex<Option<AppResult<ScrapeOutcome>>>,
    pub listing_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub scrape_calls: AtomicUsize,
}

impl FakeMarketSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `filter` with `listings` after `delay`
    pub fn with_listings(self, filter: Option<&str>, listings: Vec<Listing>, delay: Duration) -> Self {
        self.scripts.lock().unwrap().insert(
            filter.map(str::to_string),
            Script {
                delay,
                response: Ok(listings),
            },
        );
        self
    }

    pub fn with_listing_error(self, filter: Option<&str>, error: AppError, delay: Duration) -> Self {
        self.scripts.lock().unwrap().insert(
            filter.map(str::to_string),
            Script {
                delay,
                response: Err(error),
            },
        );
        self
    }

    pub fn with_top_items(self, items: Vec<TopItem>) -> Self {
        *self.top_items.lock().unwrap() = items;
        self
    }

    pub fn with_history(self, item: &str, points: Vec<PricePoint>, delay: Duration) -> Self {
        self.histories
            .lock()
            .unwrap()
            .insert(item.to_string(), points);
        self.history_delay
            .lock()
            .unwrap()
            .insert(item.to_string(), delay);
        self
    }

    pub fn with_scrape(self, result: AppResult<ScrapeOutcome>) -> Self {
        *self.scrape.lock().unwrap() = Some(result);
        self
    }
}

#[async_trait]
impl MarketDataSource for FakeMarketSource {
    async fn listings(&self, query: &ListingQuery) -> AppResult<Vec<Listing>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(&query.item_name)
            .cloned()
            .unwrap_or(Script {
                delay: Duration::ZERO,
                response: Ok(Vec::new()),
            });

        tokio::time::sleep(script.delay).await;
        script.response
    }

    async fn servers(&self) -> AppResult<Vec<ServerInfo>> {
        Ok(vec![ServerInfo {
            id: 1,
            name: "Marmara".to_string(),
        }])
    }

    async fn top_items(&self) -> AppResult<Vec<TopItem>> {
        Ok(self.top_items.lock().unwrap().clone())
    }

    async fn price_history(&self, item_name: &str) -> AppResult<Vec<PricePoint>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .history_delay
            .lock()
            .unwrap()
            .get(item_name)
            .copied()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;

        self.histories
            .lock()
            .unwrap()
            .get(item_name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No history for {}", item_name)))
    }

    async fn trigger_scrape(&self, query: &str, _server: &str) -> AppResult<ScrapeOutcome> {
        self.scrape_calls.fetch_add(1, Ordering::SeqCst);
        self.scrape.lock().unwrap().clone().unwrap_or_else(|| {
            Ok(ScrapeOutcome {
                message: format!("Scraped successfully for '{}'", query),
                output: Some("ok".to_string()),
                error: None,
            })
        })
    }
}
