use super::models::{ListingDto, PricePointDto, ScrapeResponseDto, ServerDto, TopItemDto};
use crate::log_warn;
use crate::modules::bonus::domain::RawBonus;
use crate::modules::listing::domain::{ListedItem, Listing, ServerRef};
use crate::modules::market::domain::{PricePoint, ScrapeOutcome, ServerInfo, TopItem};
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub struct MarketMapper;

impl MarketMapper {
    pub fn listing(dto: ListingDto) -> AppResult<Listing> {
        let seen_at = Self::parse_timestamp(&dto.seen_at)?;

        Ok(Listing {
            id: dto.id,
            item: ListedItem {
                name: dto.item.name,
                category: dto.item.category,
                image_url: dto.item.image_url,
            },
            server: ServerRef {
                name: dto.server.name,
            },
            seller_name: dto.seller_name,
            quantity: dto.quantity,
            price_won: dto.price_won,
            price_yang: dto.price_yang,
            total_price_yang: dto.total_price_yang,
            seen_at,
            bonuses: dto
                .bonuses
                .into_iter()
                .map(|b| RawBonus {
                    bonus_name: b.bonus_name,
                    bonus_value: b.bonus_value,
                })
                .collect(),
        })
    }

    /// Listings with an unreadable timestamp are dropped, the rest keep their order
    pub fn listings(dtos: Vec<ListingDto>) -> Vec<Listing> {
        dtos.into_iter()
            .filter_map(|dto| {
                let id = dto.id;
                Self::listing(dto)
                    .map_err(|e| log_warn!("Skipping listing {}: {}", id, e))
                    .ok()
            })
            .collect()
    }

    /// Servers without an id are skipped
    pub fn servers(dtos: Vec<ServerDto>) -> Vec<ServerInfo> {
        dtos.into_iter()
            .filter_map(|dto| dto.id.map(|id| ServerInfo { id, name: dto.name }))
            .collect()
    }

    /// Highest count first; ties keep the backend order
    pub fn top_items(dtos: Vec<TopItemDto>) -> Vec<TopItem> {
        let mut items: Vec<TopItem> = dtos
            .into_iter()
            .map(|dto| TopItem {
                name: dto.name,
                count: dto.count,
            })
            .collect();
        items.sort_by(|a, b| b.count.cmp(&a.count));
        items
    }

    /// Oldest day first. Days without an average or with a malformed date are dropped.
    pub fn price_history(dtos: Vec<PricePointDto>) -> Vec<PricePoint> {
        let mut points: Vec<PricePoint> = dtos
            .into_iter()
            .filter_map(|dto| {
                let avg_price = dto.avg_price.filter(|p| p.is_finite())?;
                match NaiveDate::parse_from_str(dto.date.trim(), "%Y-%m-%d") {
                    Ok(date) => Some(PricePoint { date, avg_price }),
                    Err(e) => {
                        log_warn!("Skipping price point '{}': {}", dto.date, e);
                        None
                    }
                }
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }

    /// A job that reported an error, or produced no output at all, is a failure
    pub fn scrape_outcome(dto: ScrapeResponseDto) -> AppResult<ScrapeOutcome> {
        let outcome = ScrapeOutcome {
            message: dto.message,
            output: dto.output,
            error: dto.error,
        };

        if outcome.is_success() {
            Ok(outcome)
        } else {
            Err(AppError::ScrapeFailed {
                message: outcome.message,
                diagnostics: outcome.error,
            })
        }
    }

    /// RFC 3339, or a naive ISO 8601 timestamp taken as UTC
    pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid timestamp '{}'", raw)))
    }
}
