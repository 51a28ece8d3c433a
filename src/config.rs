//! Configuration for the extractor client.
//!
//! Two kinds of configuration feed this crate: connection settings for the
//! upstream pool-data service (loadable from the environment), and the static
//! per-chain base-token tables that drive candidate expansion. The base-token
//! tables are supplied programmatically by the embedding application; they
//! are data, not behavior, and this crate never mutates them.

use crate::errors::{RegistryError, Result};
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use url::Url;

const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Static base-token tables for one chain.
///
/// `additional_bases` is keyed by lower-case token address: tokens that only
/// route well through a specific intermediate (e.g. MIM through SPELL) get
/// their extra hop candidates registered here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseTokenConfig {
    /// The chain's wrapped-native token (WETH and friends). Candidate
    /// expansion substitutes it for the native asset's wrapped form.
    pub wrapped_native: Option<Token>,
    /// Tokens every trade is checked against as intermediate hops.
    pub common_bases: Vec<Token>,
    /// Extra hop candidates registered for specific token addresses.
    pub additional_bases: HashMap<String, Vec<Token>>,
}

impl BaseTokenConfig {
    /// Additional bases registered for a token address, if any.
    pub fn additional_for(&self, address: &str) -> &[Token] {
        self.additional_bases
            .get(&address.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Main configuration for the pool registry and its HTTP source.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Chain whose pools this client tracks.
    pub chain_id: u64,
    /// Base URL of the upstream extractor service.
    pub extractor_url: Url,
    /// Cadence of the periodic full pool refresh.
    pub refresh_interval: Duration,
    /// Per-request timeout for upstream calls.
    pub request_timeout: Duration,
    /// Base-token tables for candidate expansion.
    pub bases: BaseTokenConfig,
}

impl ExtractorConfig {
    pub fn new(chain_id: u64, extractor_url: Url, refresh_interval: Duration) -> Self {
        Self {
            chain_id,
            extractor_url,
            refresh_interval,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            bases: BaseTokenConfig::default(),
        }
    }

    pub fn with_bases(mut self, bases: BaseTokenConfig) -> Self {
        self.bases = bases;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// ## Required
    /// - `EXTRACTOR_URL`: base URL of the upstream pool-data service
    /// - `EXTRACTOR_CHAIN_ID`: chain id to track
    ///
    /// ## Optional
    /// - `EXTRACTOR_REFRESH_INTERVAL_MS`: full refresh cadence (default 60000)
    /// - `EXTRACTOR_REQUEST_TIMEOUT_MS`: per-request timeout (default 10000)
    ///
    /// Base-token tables cannot come from the environment; attach them with
    /// [`ExtractorConfig::with_bases`].
    pub fn from_env() -> Result<Self> {
        let extractor_url = required_var("EXTRACTOR_URL")?;
        let extractor_url = Url::parse(&extractor_url).map_err(RegistryError::from)?;

        let chain_id_raw = required_var("EXTRACTOR_CHAIN_ID")?;
        let chain_id = chain_id_raw
            .parse::<u64>()
            .map_err(|_| RegistryError::InvalidConfig {
                name: "EXTRACTOR_CHAIN_ID".to_string(),
                value: chain_id_raw,
            })?;

        let refresh_interval =
            millis_var("EXTRACTOR_REFRESH_INTERVAL_MS", DEFAULT_REFRESH_INTERVAL_MS)?;
        let request_timeout =
            millis_var("EXTRACTOR_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;

        tracing::info!(
            chain_id,
            url = %extractor_url,
            refresh_interval_ms = refresh_interval.as_millis() as u64,
            "Extractor configuration loaded from environment"
        );

        Ok(Self {
            chain_id,
            extractor_url,
            refresh_interval,
            request_timeout,
            bases: BaseTokenConfig::default(),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        RegistryError::MissingEnv {
            name: name.to_string(),
        }
        .into()
    })
}

fn millis_var(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => {
            let ms = raw.parse::<u64>().map_err(|_| RegistryError::InvalidConfig {
                name: name.to_string(),
                value: raw,
            })?;
            Ok(Duration::from_millis(ms))
        }
        Err(_) => Ok(Duration::from_millis(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-var tests share process state; serialize them.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env_missing_url() {
        let _guard = TEST_MUTEX.lock().unwrap();
        env::remove_var("EXTRACTOR_URL");
        env::remove_var("EXTRACTOR_CHAIN_ID");

        let result = ExtractorConfig::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("EXTRACTOR_URL"));
    }

    #[test]
    fn test_from_env_valid() {
        let _guard = TEST_MUTEX.lock().unwrap();
        env::set_var("EXTRACTOR_URL", "https://extractor.example.com");
        env::set_var("EXTRACTOR_CHAIN_ID", "137");
        env::remove_var("EXTRACTOR_REFRESH_INTERVAL_MS");
        env::set_var("EXTRACTOR_REQUEST_TIMEOUT_MS", "2500");

        let config = ExtractorConfig::from_env().unwrap();
        assert_eq!(config.chain_id, 137);
        assert_eq!(config.refresh_interval, Duration::from_millis(60_000));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));

        env::remove_var("EXTRACTOR_URL");
        env::remove_var("EXTRACTOR_CHAIN_ID");
        env::remove_var("EXTRACTOR_REQUEST_TIMEOUT_MS");
    }

    #[test]
    fn test_from_env_invalid_chain_id() {
        let _guard = TEST_MUTEX.lock().unwrap();
        env::set_var("EXTRACTOR_URL", "https://extractor.example.com");
        env::set_var("EXTRACTOR_CHAIN_ID", "mainnet");

        let result = ExtractorConfig::from_env();
        assert!(result.is_err());

        env::remove_var("EXTRACTOR_URL");
        env::remove_var("EXTRACTOR_CHAIN_ID");
    }

    #[test]
    fn test_additional_for_is_case_insensitive() {
        let spell = Token::new(
            1,
            "0x090185f2135308bad17527004364ebcc2d37e5f6".to_string(),
            "SPELL".to_string(),
            18,
        );
        let mut additional = HashMap::new();
        additional.insert(
            "0x99d8a9c45b2eca8864373a26d1459e3dff1e17f3".to_string(),
            vec![spell],
        );
        let bases = BaseTokenConfig {
            wrapped_native: None,
            common_bases: vec![],
            additional_bases: additional,
        };

        assert_eq!(
            bases
                .additional_for("0x99D8A9C45b2ecA8864373A26D1459e3Dff1e17F3")
                .len(),
            1
        );
        assert!(bases.additional_for("0x0000").is_empty());
    }
}
