// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod config; // Runtime configuration
pub mod errors; // Shared error types
pub mod utils; // Shared utilities (logging, validation)

// Re-exports for convenience
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
