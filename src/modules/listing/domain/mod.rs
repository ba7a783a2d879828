pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{ClassifiedListing, ListedItem, Listing, ServerRef};
pub use services::{BucketCounts, ListingAggregator};
pub use value_objects::{extract_plus_level, BucketFilter, UpgradeBucket};
