pub mod entities;
pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{PricePoint, ScrapeOutcome, ServerInfo, TopItem};
pub use repositories::MarketDataSource;
pub use value_objects::{ListingQuery, ListingSort};
