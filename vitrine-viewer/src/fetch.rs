use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use vitrine_config::Config;
use vitrine_core::provider::{
    CacheStore, ContentApiClient, DataProvider, DiskCacheStore, FetchOutcome,
    NullCacheStore,
};

use crate::cli::FetchArgs;

pub fn build_provider(config: &Config) -> anyhow::Result<DataProvider> {
    let client = ContentApiClient::new(config.content_api_settings())
        .context("failed to build HTTP client")?;

    let cache: Arc<dyn CacheStore> = if config.cache.enabled {
        config.cache.ensure_directory().with_context(|| {
            format!(
                "failed to create cache directory {}",
                config.cache.dir.display()
            )
        })?;
        Arc::new(DiskCacheStore::new(config.cache_root()))
    } else {
        Arc::new(NullCacheStore)
    };

    Ok(DataProvider::new(
        Arc::new(client),
        cache,
        config.provider_settings(),
    ))
}

/// Fetch, abandoning the request on Ctrl-C.
pub async fn load_items(
    provider: &DataProvider,
    use_cache: bool,
) -> anyhow::Result<FetchOutcome> {
    tokio::select! {
        outcome = provider.fetch(use_cache) => {
            outcome.context("failed to fetch gallery items")
        }
        _ = tokio::signal::ctrl_c() => {
            provider.cancel();
            anyhow::bail!("interrupted")
        }
    }
}

pub async fn run(config: &Config, args: FetchArgs) -> anyhow::Result<()> {
    let provider = build_provider(config)?;
    let outcome = load_items(&provider, !args.no_cache).await?;
    info!(
        count = outcome.items.len(),
        source = ?outcome.source,
        "fetch finished"
    );

    if args.json {
        let json = serde_json::to_string_pretty(outcome.items.as_slice())
            .context("failed to encode items")?;
        println!("{json}");
        return Ok(());
    }

    for (index, item) in outcome.items.iter().enumerate() {
        let date = item
            .shooting_date()
            .map(|date| date.label())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:02}  {}  {}  {}",
            index + 1,
            item.title,
            date,
            item.image_url().unwrap_or("-")
        );
    }
    Ok(())
}
