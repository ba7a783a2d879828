use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Item query sent to the ingestion job ("Kılıç", "Dolunay Kılıcı+9")
    pub fn validate_search_query(query: &str) -> Result<(), AppError> {
        if query.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Search query cannot be empty".to_string(),
            ));
        }
        if query.chars().count() > 100 {
            return Err(AppError::ValidationError(
                "Search query too long (max 100 characters)".to_string(),
            ));
        }
        if query.chars().any(|c| c.is_control()) {
            return Err(AppError::ValidationError(
                "Search query contains control characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_server_name(server: &str) -> Result<(), AppError> {
        if server.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Server name cannot be empty".to_string(),
            ));
        }
        if server.chars().count() > 50 {
            return Err(AppError::ValidationError(
                "Server name too long (max 50 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_item_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Item name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > 255 {
            return Err(AppError::ValidationError(
                "Item name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }
}
