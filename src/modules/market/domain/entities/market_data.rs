use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ServerInfo {
    pub id: i64,
    pub name: String,
}

/// Item ranked by number of listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct TopItem {
    pub name: String,
    pub count: i64,
}

/// Daily average total price in Yang
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub avg_price: f64,
}

/// Result reported by the ingestion job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ScrapeOutcome {
    pub message: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ScrapeOutcome {
    /// A job succeeded only when it produced output and no error
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.output.is_some()
    }
}
