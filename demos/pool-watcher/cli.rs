//! Command-line arguments for the pool watcher.

use clap::Parser;
use extractor_client::config::ExtractorConfig;
use extractor_client::errors::{RegistryError, Result};
use std::time::Duration;
use url::Url;

/// Watch the pool inventory of an extractor service.
#[derive(Debug, Parser)]
#[command(name = "pool-watcher")]
pub struct Args {
    /// Base URL of the upstream extractor service
    #[arg(long, env = "EXTRACTOR_URL")]
    pub extractor_url: String,

    /// Chain id to track
    #[arg(long, env = "EXTRACTOR_CHAIN_ID", default_value_t = 1)]
    pub chain_id: u64,

    /// Full refresh cadence in milliseconds
    #[arg(long, env = "EXTRACTOR_REFRESH_INTERVAL_MS", default_value_t = 60_000)]
    pub refresh_interval_ms: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "EXTRACTOR_REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    pub request_timeout_ms: u64,

    /// Seconds between inventory status reports
    #[arg(long, default_value_t = 30)]
    pub status_interval_secs: u64,
}

impl Args {
    pub fn into_config(self) -> Result<ExtractorConfig> {
        let url = Url::parse(&self.extractor_url).map_err(RegistryError::from)?;
        Ok(ExtractorConfig::new(
            self.chain_id,
            url,
            Duration::from_millis(self.refresh_interval_ms),
        )
        .with_request_timeout(Duration::from_millis(self.request_timeout_ms)))
    }
}
