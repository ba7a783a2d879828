use crate::shared::errors::AppError;
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum ListingSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl ListingSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingSort::Newest => "newest",
            ListingSort::PriceAsc => "price_asc",
            ListingSort::PriceDesc => "price_desc",
        }
    }
}

impl FromStr for ListingSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(ListingSort::Newest),
            "price_asc" => Ok(ListingSort::PriceAsc),
            "price_desc" => Ok(ListingSort::PriceDesc),
            other => Err(AppError::InvalidInput(format!(
                "Unknown listing sort '{}'",
                other
            ))),
        }
    }
}

/// Listing request forwarded to the market API. Name matching is a
/// server-side substring match; server matching is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ListingQuery {
    pub item_name: Option<String>,
    pub server: Option<String>,
    pub sort: ListingSort,
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            item_name: None,
            server: None,
            sort: ListingSort::Newest,
            skip: 0,
            limit: 100,
        }
    }
}

impl ListingQuery {
    /// Blank filters are treated as absent
    pub fn filtered(item_name: Option<&str>, server: Option<&str>) -> Self {
        Self {
            item_name: non_blank(item_name),
            server: non_blank(server),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.item_name {
            Validator::validate_item_name(name)?;
        }
        if let Some(server) = &self.server {
            Validator::validate_server_name(server)?;
        }
        if self.limit == 0 {
            return Err(AppError::InvalidInput(
                "Listing limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Query string pairs in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
            ("sort_by", self.sort.as_str().to_string()),
        ];
        if let Some(server) = &self.server {
            params.push(("server", server.clone()));
        }
        if let Some(name) = &self.item_name {
            params.push(("item_name", name.clone()));
        }
        params
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
