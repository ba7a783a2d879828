use super::mapper::MarketMapper;
use super::models::{
    ListingDto, PricePointDto, ScrapeRequest, ScrapeResponseDto, ServerDto, TopItemDto,
};
use crate::modules::listing::domain::Listing;
use crate::modules::market::domain::{
    ListingQuery, MarketDataSource, PricePoint, ScrapeOutcome, ServerInfo, TopItem,
};
use crate::modules::market::infrastructure::http_client::RateLimitClient;
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation, Validator};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// `MarketDataSource` backed by the market HTTP API
pub struct MarketApiClient {
    base_url: String,
    http: RateLimitClient,
    scrape_timeout: Duration,
}

impl MarketApiClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::with_http(
            &config.api_base_url,
            RateLimitClient::for_market_api(config)?,
            config.scrape_timeout,
        ))
    }

    pub fn with_http(base_url: &str, http: RateLimitClient, scrape_timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            scrape_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn timed_get<T>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        LogContext::api_call(path, "started", None);
        let timer = TimedOperation::new(format!("GET {}", path));

        let result = self.http.get_with_query(&self.url(path), query).await;
        let duration = timer.finish();
        LogContext::api_call(
            path,
            if result.is_ok() { "ok" } else { "failed" },
            Some(duration),
        );
        result
    }
}

#[async_trait]
impl MarketDataSource for MarketApiClient {
    async fn listings(&self, query: &ListingQuery) -> AppResult<Vec<Listing>> {
        query.validate()?;
        let dtos: Vec<ListingDto> = self.timed_get("/market/listings", &query.to_params()).await?;
        Ok(MarketMapper::listings(dtos))
    }

    async fn servers(&self) -> AppResult<Vec<ServerInfo>> {
        let dtos: Vec<ServerDto> = self.timed_get("/market/servers", &[]).await?;
        Ok(MarketMapper::servers(dtos))
    }

    async fn top_items(&self) -> AppResult<Vec<TopItem>> {
        let dtos: Vec<TopItemDto> = self.timed_get("/market/stats/top-items", &[]).await?;
        Ok(MarketMapper::top_items(dtos))
    }

    async fn price_history(&self, item_name: &str) -> AppResult<Vec<PricePoint>> {
        Validator::validate_item_name(item_name)?;
        let dtos: Vec<PricePointDto> = self
            .timed_get(
                "/market/stats/price-history",
                &[("item_name", item_name.to_string())],
            )
            .await?;
        Ok(MarketMapper::price_history(dtos))
    }

    async fn trigger_scrape(&self, query: &str, server: &str) -> AppResult<ScrapeOutcome> {
        Validator::validate_search_query(query)?;
        Validator::validate_server_name(server)?;

        info!("Triggering scrape for '{}' on {}", query, server);
        let timer = TimedOperation::new("POST /scrape");

        let response: ScrapeResponseDto = self
            .http
            .post_json_once(
                &self.url("/scrape"),
                &ScrapeRequest { query, server },
                self.scrape_timeout,
            )
            .await
            .map_err(|e| match e {
                AppError::ExternalServiceError(msg) => AppError::ScrapeFailed {
                    message: format!("Scrape request failed: {}", msg),
                    diagnostics: None,
                },
                other => other,
            })?;

        timer.finish_with_info(&response.message);
        MarketMapper::scrape_outcome(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let config = AppConfig::default();
        let client = MarketApiClient::with_http(
            "http://127.0.0.1:8000/",
            RateLimitClient::for_market_api(&config).unwrap(),
            config.scrape_timeout,
        );
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
        assert_eq!(
            client.url("/market/servers"),
            "http://127.0.0.1:8000/market/servers"
        );
    }
}
