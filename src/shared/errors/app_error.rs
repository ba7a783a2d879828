use serde::Serialize;
use specta::Type;
use thiserror::Error;

/// Errors crossing the desktop bridge keep their variant as `type`, so the
/// frontend can tell a failed ingestion job from a failed read.
#[derive(Error, Debug, Clone, Serialize, Type)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// Ingestion job reported failure. `diagnostics` carries the job's stderr when present.
    #[error("Scrape failed: {message}{}", diagnostics_suffix(.diagnostics))]
    ScrapeFailed {
        message: String,
        diagnostics: Option<String>,
    },
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to market API".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("Market API resource not found".to_string()),
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

fn diagnostics_suffix(diagnostics: &Option<String>) -> String {
    match diagnostics.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => format!("\n{}", d),
        _ => String::new(),
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
