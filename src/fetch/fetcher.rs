use std::time::Duration;

use serde_json::Value;

use super::error::FetchError;

/// Reads JSON documents from an HTTP endpoint or the local filesystem.
///
/// The locator prefix picks the transport: anything starting with `http`
/// goes through the HTTP client, everything else is treated as a path.
/// Both transports are bounded by the same timeout. There is no retry here,
/// callers re-poll on their next cycle.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            client: self.client.clone(),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn fetch(&self, resource: &str) -> Result<Value, FetchError> {
        log::debug!("fetching {}", resource);
        if resource.starts_with("http") {
            self.fetch_http(resource).await
        } else {
            self.fetch_file(resource).await
        }
    }

    async fn fetch_http(&self, resource: &str) -> Result<Value, FetchError> {
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(resource.to_string())
            } else {
                FetchError::Client {
                    resource: resource.to_string(),
                    source: e,
                }
            }
        };

        let resp = self
            .client
            .get(resource)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_err)?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                status: resp.status(),
                resource: resource.to_string(),
            });
        }

        let body = resp.bytes().await.map_err(map_err)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            resource: resource.to_string(),
            source,
        })
    }

    async fn fetch_file(&self, resource: &str) -> Result<Value, FetchError> {
        let content = tokio::time::timeout(self.timeout, tokio::fs::read_to_string(resource))
            .await
            .map_err(|_| FetchError::Timeout(resource.to_string()))?
            .map_err(|source| FetchError::Read {
                resource: resource.to_string(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| FetchError::Parse {
            resource: resource.to_string(),
            source,
        })
    }
}
