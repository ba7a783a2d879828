pub mod classified_listing;
pub mod listing;

pub use classified_listing::ClassifiedListing;
pub use listing::{ListedItem, Listing, ServerRef};
