//! Upstream pool-data service transport.
//!
//! `PoolDataSource` is the seam between the registry and the network: the
//! four upstream endpoints expressed as an async trait, with
//! `ExtractorHttpClient` as the production implementation. Tests substitute
//! an in-memory source behind the same trait.

use crate::config::ExtractorConfig;
use crate::errors::RegistryError;
use crate::token::{PoolRecord, Token};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

/// Result type for upstream source operations.
pub type SourceResult<T> = std::result::Result<T, RegistryError>;

/// The upstream pool-data service, reduced to the four calls the registry
/// makes. All methods are network-bound and may suspend.
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    /// Fetch the complete pool set for a chain (`GET /pools-json/{chainId}`).
    /// Any non-success status is a refresh failure.
    async fn all_pools(&self, chain_id: u64) -> SourceResult<Vec<PoolRecord>>;

    /// Fetch pools between exactly one pair of token addresses
    /// (`GET /pools-between/{a}/{b}`).
    async fn pools_between(&self, addr0: &str, addr1: &str) -> SourceResult<Vec<PoolRecord>>;

    /// Fetch all pools touching one token (`GET /pools-for-token/{addr}`).
    async fn pools_for_token(&self, address: &str) -> SourceResult<Vec<PoolRecord>>;

    /// Fetch token metadata (`GET /token/{addr}`). HTTP 422 means the token
    /// does not exist and resolves to `Ok(None)`, not an error.
    async fn token(&self, address: &str) -> SourceResult<Option<Token>>;
}

/// reqwest-backed implementation of [`PoolDataSource`].
pub struct ExtractorHttpClient {
    http: HttpClient,
    base_url: String,
}

impl ExtractorHttpClient {
    /// Create a client for an extractor endpoint with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> SourceResult<Self> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the extractor configuration.
    pub fn from_config(config: &ExtractorConfig) -> SourceResult<Self> {
        Self::new(config.extractor_url.as_str(), config.request_timeout)
    }

    async fn get_pool_list(&self, url: String) -> SourceResult<Vec<PoolRecord>> {
        tracing::debug!(url = %url, "Requesting pool list from upstream");
        let response = self.http.get(url.as_str()).send().await?;
        if response.status() != StatusCode::OK {
            return Err(RegistryError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        // Decode off the raw body so payload problems surface as Parse, not
        // as transport failures.
        let body = response.text().await?;
        let pools: Vec<PoolRecord> = serde_json::from_str(&body)?;
        Ok(pools)
    }
}

#[async_trait]
impl PoolDataSource for ExtractorHttpClient {
    async fn all_pools(&self, chain_id: u64) -> SourceResult<Vec<PoolRecord>> {
        self.get_pool_list(format!("{}/pools-json/{}", self.base_url, chain_id))
            .await
    }

    async fn pools_between(&self, addr0: &str, addr1: &str) -> SourceResult<Vec<PoolRecord>> {
        self.get_pool_list(format!(
            "{}/pools-between/{}/{}",
            self.base_url, addr0, addr1
        ))
        .await
    }

    async fn pools_for_token(&self, address: &str) -> SourceResult<Vec<PoolRecord>> {
        self.get_pool_list(format!("{}/pools-for-token/{}", self.base_url, address))
            .await
    }

    async fn token(&self, address: &str) -> SourceResult<Option<Token>> {
        let url = format!("{}/token/{}", self.base_url, address);
        tracing::debug!(url = %url, "Requesting token metadata from upstream");
        let response = self.http.get(url.as_str()).send().await?;
        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let token: Token = serde_json::from_str(&body)?;
                Ok(Some(token))
            }
            StatusCode::UNPROCESSABLE_ENTITY => Ok(None),
            status => Err(RegistryError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            ExtractorHttpClient::new("https://extractor.example.com/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "https://extractor.example.com");
    }
}
