pub mod price_history_cache;

pub use price_history_cache::PriceHistoryCache;
