pub mod dashboard;
pub mod request_sequencer;
pub mod service;

pub use dashboard::{DashboardSnapshot, MarketStats, RefreshOutcome, ScanResult};
pub use request_sequencer::{RequestSequencer, RequestTicket};
pub use service::MarketService;
