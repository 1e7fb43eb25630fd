//! Low-level HTTP client: `DashboardHttp`.
//!
//! Generic JSON GET/POST with retry policies. Returns wire types; conversion to
//! domain types happens in the domain sub-clients.

use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Low-level HTTP client shared by the indexer and price sub-clients.
#[derive(Clone)]
pub struct DashboardHttp {
    client: Client,
}

impl DashboardHttp {
    /// Build a client. `timeout` applies on native targets only; the browser
    /// enforces its own fetch limits.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(&method, url, body).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            let e = match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) if !config.should_retry(&e) => return Err(e),
                Err(e) => e,
            };
            if attempt == config.max_retries {
                last_error = Some(e);
                break;
            }

            let delay = match &e {
                HttpError::RateLimited {
                    retry_after_ms: Some(ms),
                } => Duration::from_millis(*ms),
                _ => config.delay_for_attempt(attempt),
            };
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %e,
                "Retrying {} {}",
                method,
                redact(url)
            );
            futures_timer::Delay::new(delay).await;
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized(body_text)),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// Strip the trailing path segment (the indexer API key) from a URL for logs.
pub(crate) fn redact(url: &str) -> String {
    let path_end = url.find('?').unwrap_or(url.len());
    match url[..path_end].rfind('/') {
        Some(idx) if idx + 1 < path_end && url[..idx].contains("/v2") => {
            format!("{}/***{}", &url[..idx], &url[path_end..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_api_key() {
        assert_eq!(
            redact("https://eth-mainnet.g.alchemy.com/v2/secretkey"),
            "https://eth-mainnet.g.alchemy.com/v2/***"
        );
    }

    #[test]
    fn test_redact_leaves_other_urls() {
        let url = "https://api.coingecko.com/api/v3/simple/price?ids=ethereum";
        assert_eq!(redact(url), url);
    }
}
