pub mod bonus;
pub mod listing;
pub mod market;
