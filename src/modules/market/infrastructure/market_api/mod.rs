pub mod client;
pub mod mapper;
pub mod models;

pub use client::MarketApiClient;
pub use mapper::MarketMapper;
