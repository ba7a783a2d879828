pub mod listing_query;

pub use listing_query::{ListingQuery, ListingSort};
