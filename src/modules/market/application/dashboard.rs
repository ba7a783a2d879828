use crate::modules::listing::domain::{BucketCounts, BucketFilter, ClassifiedListing, Listing};
use crate::modules::market::domain::{PricePoint, TopItem};
use crate::shared::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use specta::Type;

/// Last committed dashboard data. Only `MarketService` writes it.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub listings: Vec<Listing>,
    pub top_items: Vec<TopItem>,
    pub chart_item: Option<String>,
    pub price_history: Vec<PricePoint>,
    /// Item name filter of the committed listings
    pub active_filter: Option<String>,
    pub server: Option<String>,
    pub last_error: Option<AppError>,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct MarketStats {
    pub total_listings: u32,
    pub visible_listings: u32,
    pub max_roll_listings: u32,
    pub most_traded_item: Option<TopItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct DashboardSnapshot {
    pub listings: Vec<ClassifiedListing>,
    pub bucket: BucketFilter,
    pub bucket_counts: BucketCounts,
    pub top_items: Vec<TopItem>,
    pub chart_item: Option<String>,
    pub price_history: Vec<PricePoint>,
    pub stats: MarketStats,
    pub active_filter: Option<String>,
    pub server: Option<String>,
    pub last_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// How a refresh or chart request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Response committed to the dashboard
    Applied { sequence: u64 },
    /// A newer request was issued first; the response was discarded
    Superseded { sequence: u64 },
}

impl RefreshOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            RefreshOutcome::Applied { sequence } | RefreshOutcome::Superseded { sequence } => {
                *sequence
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Result of a scan: the ingestion report and the refresh that followed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct ScanResult {
    pub message: String,
    pub refresh: RefreshOutcome,
}
