//! HTTP client for the market backend with client-side rate limiting and retries

use super::retry_policy::{is_retryable_error, is_retryable_status, RateLimitInfo, RetryPolicy};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("pazar/", env!("CARGO_PKG_VERSION"));

pub struct RateLimitClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    retry_policy: RetryPolicy,
    service_name: String,
}

impl RateLimitClient {
    pub fn for_market_api(config: &AppConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self::new(
            "Market",
            client,
            RetryPolicy::market_api(),
            Self::create_rate_limiter(config.requests_per_second, config.burst_size)?,
        ))
    }

    /// Quota of `requests_per_second` with bursts of up to `burst_size`
    pub fn create_rate_limiter(
        requests_per_second: f64,
        burst_size: u32,
    ) -> AppResult<DefaultDirectRateLimiter> {
        let invalid = || {
            AppError::ConfigError(format!(
                "Invalid request rate: {} requests per second",
                requests_per_second
            ))
        };

        if !(requests_per_second.is_finite() && requests_per_second > 0.0) {
            return Err(invalid());
        }
        let period = Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|_| invalid())?;
        let burst = NonZeroU32::new(burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period).ok_or_else(invalid)?.allow_burst(burst);

        Ok(RateLimiter::direct(quota))
    }

    pub fn new(
        service_name: &str,
        client: Client,
        retry_policy: RetryPolicy,
        rate_limiter: DefaultDirectRateLimiter,
    ) -> Self {
        Self {
            client,
            rate_limiter,
            retry_policy,
            service_name: service_name.to_string(),
        }
    }

    /// GET with query pairs; values are percent-encoded by reqwest
    pub async fn get_with_query<T>(&self, url: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.retry_policy.max_retries {
            self.rate_limiter.until_ready().await;

            let request = self.client.get(url).query(query);
            match self.send(request).await {
                Ok(response) if response.status().is_success() => {
                    return self.parse_response(response).await;
                }
                Ok(response) => {
                    let status = response.status();
                    let rate_limit_info = RateLimitInfo::from_headers(response.headers());
                    let error = self.status_error(&Method::GET, url, status);

                    if is_retryable_status(status) && attempt < self.retry_policy.max_retries {
                        let delay = self
                            .retry_policy
                            .calculate_delay(attempt, rate_limit_info.retry_after);
                        warn!(
                            "{} (attempt {}/{}). Retrying in {:?}",
                            error,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            delay
                        );
                        last_error = Some(error);
                        sleep(delay).await;
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    if is_retryable_error(&e) && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        warn!(
                            "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.service_name,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            e,
                            delay
                        );
                        last_error = Some(AppError::from(e));
                        sleep(delay).await;
                        continue;
                    }
                    return Err(AppError::from(e));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::ExternalServiceError(format!(
                "{} API request failed after {} attempts",
                self.service_name,
                self.retry_policy.max_retries + 1
            ))
        }))
    }

    /// POST a JSON body exactly once with its own timeout
    pub async fn post_json_once<B, T>(&self, url: &str, body: &B, timeout: Duration) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.rate_limiter.until_ready().await;

        let request = self.client.post(url).json(body).timeout(timeout);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(self.status_error(&Method::POST, url, response.status()));
        }
        self.parse_response(response).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        let response = request.header("Accept", "application/json").send().await?;
        debug!("{} API responded {}", self.service_name, response.status());
        Ok(response)
    }

    fn status_error(&self, method: &Method, url: &str, status: StatusCode) -> AppError {
        let message = format!(
            "{} API {} {} returned {}",
            self.service_name, method, url, status
        );
        match status.as_u16() {
            404 => AppError::NotFound(message),
            429 => AppError::RateLimitError(message),
            400 | 422 => AppError::InvalidInput(message),
            s if is_retryable_status(status) || s >= 500 => {
                AppError::ExternalServiceError(message)
            }
            _ => AppError::ApiError(message),
        }
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.service_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.service_name,
                e,
                truncate_chars(&response_text, 200)
            ))
        })
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
