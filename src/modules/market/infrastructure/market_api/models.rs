// Wire models of the market backend (FastAPI + pydantic)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDto {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusDto {
    pub bonus_name: String,
    #[serde(default)]
    pub bonus_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDto {
    pub id: i64,
    pub server: ServerDto,
    pub item: ItemDto,
    pub seller_name: String,
    pub quantity: i64,
    pub price_won: i64,
    pub price_yang: i64,
    pub total_price_yang: i64,
    /// ISO 8601; naive timestamps are UTC
    pub seen_at: String,
    #[serde(default)]
    pub bonuses: Vec<BonusDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItemDto {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePointDto {
    pub date: String,
    #[serde(default)]
    pub avg_price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeRequest<'a> {
    pub query: &'a str,
    pub server: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponseDto {
    pub message: String,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
