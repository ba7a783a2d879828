//! Retry and backoff rules for market API reads
//!
//! Delays grow exponentially per attempt, honour `Retry-After` when the
//! backend sends it, and carry a small random jitter.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Upper bound for any single wait, including server-provided ones
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Fraction of the delay added at random (0.1 = up to 10%)
    pub jitter: f64,
}

impl RetryPolicy {
    /// Reads against the local market backend
    pub fn market_api() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: 0.1,
        }
    }

    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64)
            .min(self.max_delay);

        if self.jitter > 0.0 {
            let jitter_ms = (delay.as_millis() as f64 * self.jitter * rand::random::<f64>()) as u64;
            delay + Duration::from_millis(jitter_ms)
        } else {
            delay
        }
    }
}

/// Rate limit hints from a 429/503 response
#[derive(Debug, Clone, Default)]
pub struct RateLimitInfo {
    pub retry_after: Option<Duration>,
}

impl RateLimitInfo {
    /// Only the delta-seconds form of `Retry-After` is understood
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        Self {
            retry_after: headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }
}

/// Statuses worth another attempt
pub fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 425 | 429 | 500..=599)
}

/// Transport failures worth another attempt
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    match error.status() {
        Some(status) => is_retryable_status(status),
        None => error.is_timeout() || error.is_connect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_api_policy() {
        let policy = RetryPolicy::market_api();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let policy = RetryPolicy::market_api();
        assert_eq!(
            policy.calculate_delay(0, Some(Duration::from_secs(5))),
            Duration::from_secs(5)
        );
        assert_eq!(
            policy.calculate_delay(0, Some(Duration::from_secs(600))),
            policy.max_delay
        );
    }

    #[test]
    fn test_backoff_grows_within_jitter_bounds() {
        let policy = RetryPolicy::market_api();
        let first = policy.calculate_delay(0, None);
        let third = policy.calculate_delay(2, None);

        assert!(first >= Duration::from_millis(500) && first <= Duration::from_millis(550));
        assert!(third >= Duration::from_millis(2000) && third <= Duration::from_millis(2200));
    }

    #[test]
    fn test_rate_limit_info_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        assert_eq!(RateLimitInfo::from_headers(&headers).retry_after, None);

        headers.insert("retry-after", "30".parse().unwrap());
        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.retry_after, Some(Duration::from_secs(30)));

        headers.insert("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap());
        assert_eq!(RateLimitInfo::from_headers(&headers).retry_after, None);
    }

    #[test]
    fn test_retryable_statuses() {
        use reqwest::StatusCode;
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::REQUEST_TIMEOUT));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
