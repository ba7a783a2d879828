use super::dashboard::{
    DashboardSnapshot, DashboardState, MarketStats, RefreshOutcome, ScanResult,
};
use super::request_sequencer::RequestSequencer;
use crate::modules::bonus::domain::BonusTaxonomy;
use crate::modules::listing::domain::{BucketFilter, Listing, ListingAggregator};
use crate::modules::market::domain::{
    ListingQuery, MarketDataSource, PricePoint, ServerInfo, TopItem,
};
use crate::modules::market::infrastructure::PriceHistoryCache;
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, Validator};
use crate::{log_debug, log_info, log_warn};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

const PRICE_HISTORY_CACHE_ENTRIES: usize = 256;

type RefreshData = (Vec<Listing>, Vec<TopItem>, Option<ChartLoad>);

struct ChartLoad {
    item: String,
    history: AppResult<Vec<PricePoint>>,
}

/// Dashboard orchestration over a `MarketDataSource`.
///
/// Refreshes may overlap. Every refresh takes a ticket from its sequencer and
/// commits only while that ticket is the latest, so a slow response can never
/// replace data from a request issued after it. Chart loads use their own
/// sequencer. Failed refreshes keep the previously loaded listings.
pub struct MarketService {
    source: Arc<dyn MarketDataSource>,
    taxonomy: Arc<BonusTaxonomy>,
    price_history_cache: PriceHistoryCache,
    state: RwLock<DashboardState>,
    refresh_sequencer: RequestSequencer,
    chart_sequencer: RequestSequencer,
    default_server: String,
}

impl MarketService {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        taxonomy: Arc<BonusTaxonomy>,
        config: &AppConfig,
    ) -> Self {
        Self {
            source,
            taxonomy,
            price_history_cache: PriceHistoryCache::new(
                config.price_history_ttl,
                PRICE_HISTORY_CACHE_ENTRIES,
            ),
            state: RwLock::new(DashboardState::default()),
            refresh_sequencer: RequestSequencer::new(),
            chart_sequencer: RequestSequencer::new(),
            default_server: config.default_server.clone(),
        }
    }

    pub fn taxonomy(&self) -> &BonusTaxonomy {
        &self.taxonomy
    }

    pub fn default_server(&self) -> &str {
        &self.default_server
    }

    pub async fn servers(&self) -> AppResult<Vec<ServerInfo>> {
        self.source.servers().await
    }

    /// Fetch listings and top items for the given filters and commit them if
    /// no newer refresh was started in the meantime.
    pub async fn refresh(
        &self,
        item_filter: Option<&str>,
        server: Option<&str>,
    ) -> AppResult<RefreshOutcome> {
        let query = ListingQuery::filtered(item_filter, server);
        let ticket = self.refresh_sequencer.begin();
        let sequence = ticket.sequence();
        LogContext::refresh(sequence, query.item_name.as_deref(), "started");

        let result = tokio::select! {
            biased;
            _ = ticket.token().cancelled() => {
                LogContext::refresh(sequence, query.item_name.as_deref(), "superseded in flight");
                return Ok(RefreshOutcome::Superseded { sequence });
            }
            result = self.fetch_refresh_data(&query) => result,
        };

        let mut state = self.state.write().await;
        if !self.refresh_sequencer.is_current(&ticket) {
            LogContext::refresh(sequence, query.item_name.as_deref(), "stale response discarded");
            return Ok(RefreshOutcome::Superseded { sequence });
        }

        match result {
            Ok((listings, top_items, chart)) => {
                LogContext::refresh(
                    sequence,
                    query.item_name.as_deref(),
                    &format!("{} listings", listings.len()),
                );
                state.listings = listings;
                state.top_items = top_items;
                state.active_filter = query.item_name.clone();
                state.server = query.server.clone();
                state.last_error = None;
                state.refreshed_at = Some(Utc::now());
                state.sequence = sequence;

                if let Some(chart) = chart {
                    Self::commit_initial_chart(&mut state, chart);
                }
                Ok(RefreshOutcome::Applied { sequence })
            }
            Err(e) => {
                LogContext::error_with_context(&e, &format!("Refresh #{} failed", sequence));
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Show the price history of `item_name` in the chart
    pub async fn select_chart_item(&self, item_name: &str) -> AppResult<RefreshOutcome> {
        Validator::validate_item_name(item_name)?;
        let ticket = self.chart_sequencer.begin();
        let sequence = ticket.sequence();

        let history = tokio::select! {
            biased;
            _ = ticket.token().cancelled() => {
                return Ok(RefreshOutcome::Superseded { sequence });
            }
            history = self.load_price_history(item_name) => history?,
        };

        let mut state = self.state.write().await;
        if !self.chart_sequencer.is_current(&ticket) {
            log_debug!("Discarding stale price history for '{}'", item_name);
            return Ok(RefreshOutcome::Superseded { sequence });
        }

        state.chart_item = Some(item_name.to_string());
        state.price_history = history;
        Ok(RefreshOutcome::Applied { sequence })
    }

    /// Run an ingestion job for `query`, then refresh filtered to it.
    /// A failed job leaves the dashboard untouched.
    pub async fn scrape_and_refresh(
        &self,
        query: &str,
        server: Option<&str>,
    ) -> AppResult<ScanResult> {
        let query = query.trim();
        Validator::validate_search_query(query)?;
        let server = server
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_server);

        let outcome = self.source.trigger_scrape(query, server).await?;
        log_info!("{}", outcome.message);

        // New rows change the daily averages
        self.price_history_cache.invalidate_all();

        let refresh = self.refresh(Some(query), Some(server)).await?;
        Ok(ScanResult {
            message: outcome.message,
            refresh,
        })
    }

    pub async fn clear_filter(&self) -> AppResult<RefreshOutcome> {
        self.refresh(None, None).await
    }

    /// Read-side view of the committed state
    pub async fn snapshot(&self, bucket: BucketFilter) -> DashboardSnapshot {
        let state = self.state.read().await;
        let aggregator = ListingAggregator::new(&self.taxonomy);

        let listings = aggregator.view(&state.listings, bucket);
        let max_roll_listings = listings.iter().filter(|l| l.has_max_roll()).count() as u32;

        DashboardSnapshot {
            bucket,
            bucket_counts: ListingAggregator::bucket_counts(&state.listings),
            stats: MarketStats {
                total_listings: state.listings.len() as u32,
                visible_listings: listings.len() as u32,
                max_roll_listings,
                most_traded_item: state.top_items.first().cloned(),
            },
            listings,
            top_items: state.top_items.clone(),
            chart_item: state.chart_item.clone(),
            price_history: state.price_history.clone(),
            active_filter: state.active_filter.clone(),
            server: state.server.clone(),
            last_error: state.last_error.as_ref().map(|e| e.to_string()),
            refreshed_at: state.refreshed_at,
        }
    }

    /// Sequence number of the last committed refresh
    pub async fn committed_sequence(&self) -> u64 {
        self.state.read().await.sequence
    }

    async fn fetch_refresh_data(&self, query: &ListingQuery) -> AppResult<RefreshData> {
        let (listings, top_items) =
            futures::try_join!(self.source.listings(query), self.source.top_items())?;

        let needs_chart = self.state.read().await.chart_item.is_none();
        let chart = match top_items.first() {
            Some(top) if needs_chart => Some(ChartLoad {
                item: top.name.clone(),
                history: self.load_price_history(&top.name).await,
            }),
            _ => None,
        };

        Ok((listings, top_items, chart))
    }

    fn commit_initial_chart(state: &mut DashboardState, chart: ChartLoad) {
        // A chart picked by the user while this refresh was running wins
        if state.chart_item.is_some() {
            return;
        }
        state.chart_item = Some(chart.item);
        match chart.history {
            Ok(history) => state.price_history = history,
            Err(e) => {
                log_warn!("Price history unavailable: {}", e);
                state.price_history.clear();
                state.last_error = Some(e);
            }
        }
    }

    async fn load_price_history(&self, item_name: &str) -> AppResult<Vec<PricePoint>> {
        if let Some(cached) = self.price_history_cache.get(item_name) {
            return Ok(cached);
        }

        let history = self.source.price_history(item_name).await?;
        self.price_history_cache.insert(item_name, history.clone());
        Ok(history)
    }
}
