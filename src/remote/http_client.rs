//! Async HTTP client wrapping reqwest.
//!
//! Plain JSON GETs with timeouts, retry on 5xx, and exponential backoff
//! on 429. The grid and ranking services are the only upstreams.

use crate::error::{ReefError, ReefResult};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// HTTP client shared by the remote service calls.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("reefguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET a JSON document with retry on 5xx and backoff on 429.
    ///
    /// Non-success statuses resolve to [`ReefError::NetworkUnreachable`];
    /// an undecodable body resolves to [`ReefError::MalformedResponse`].
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ReefResult<T> {
        let mut retries = 0u32;
        let max_retries = 2;

        loop {
            let resp = self.client.get(url.clone()).send().await;

            match resp {
                Ok(r) => {
                    let status = r.status();

                    // Retry on 5xx
                    if status.is_server_error() && retries < max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    // Backoff on 429
                    if status.as_u16() == 429 && retries < max_retries {
                        retries += 1;
                        let retry_after = r
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(2);
                        tokio::time::sleep(Duration::from_secs(retry_after.min(10))).await;
                        continue;
                    }

                    if !status.is_success() {
                        return Err(ReefError::NetworkUnreachable(format!(
                            "{url} returned HTTP {status}"
                        )));
                    }

                    return r
                        .json::<T>()
                        .await
                        .map_err(|e| ReefError::MalformedResponse(e.to_string()));
                }
                Err(e) => {
                    if retries < max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(ReefError::NetworkUnreachable(e.to_string()));
                }
            }
        }
    }
}
