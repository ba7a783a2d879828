use crate::modules::bonus::domain::RawBonus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ListedItem {
    pub name: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ServerRef {
    pub name: String,
}

/// A market listing as ingested. Immutable; bonus order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Listing {
    pub id: i64,
    pub item: ListedItem,
    pub server: ServerRef,
    pub seller_name: String,
    pub quantity: i64,
    pub price_won: i64,
    pub price_yang: i64,
    pub total_price_yang: i64,
    pub seen_at: DateTime<Utc>,
    pub bonuses: Vec<RawBonus>,
}

impl Listing {
    /// Price per unit in Yang, `None` when the listing has no quantity
    pub fn unit_price_yang(&self) -> Option<i64> {
        if self.quantity > 0 {
            Some(self.total_price_yang / self.quantity)
        } else {
            None
        }
    }
}
