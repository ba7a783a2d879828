pub mod domain;

// Re-exports for easy external access
pub use domain::{
    extract_plus_level, BucketCounts, BucketFilter, ClassifiedListing, ListedItem, Listing,
    ListingAggregator, ServerRef, UpgradeBucket,
};
