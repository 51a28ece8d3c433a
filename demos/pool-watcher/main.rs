pub mod cli;

use clap::Parser;
use extractor_client::errors::Result;
use extractor_client::registry::{ExtractorHttpClient, PoolDataSource, PoolRegistry};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pool_watcher=info".parse().unwrap())
                .add_directive("extractor_client=info".parse().unwrap()),
        )
        .compact()
        .with_file(false)
        .with_line_number(false)
        .with_target(false)
        .init();

    let args = cli::Args::parse();
    let status_interval = Duration::from_secs(args.status_interval_secs);
    let config = args.into_config()?;

    let source = ExtractorHttpClient::from_config(&config)?;
    let registry = Arc::new(PoolRegistry::new(
        &config,
        Arc::new(source) as Arc<dyn PoolDataSource>,
    ));
    let refresh = registry.start_refresh_loop();

    tracing::info!(
        chain_id = config.chain_id,
        url = %config.extractor_url,
        "Watching pool inventory"
    );

    let mut ticker = tokio::time::interval(status_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let stats = registry.stats();
                tracing::info!(
                    tokens = stats.token_count,
                    pools = stats.pool_count,
                    last_refresh = ?registry.last_refresh(),
                    "Inventory status"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                refresh.shutdown();
                break;
            }
        }
    }

    Ok(())
}
