pub mod listing_aggregator;

pub use listing_aggregator::{BucketCounts, ListingAggregator};
