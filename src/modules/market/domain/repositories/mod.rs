pub mod market_data_source;

pub use market_data_source::MarketDataSource;
#[cfg(test)]
pub use market_data_source::MockMarketDataSource;
