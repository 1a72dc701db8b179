use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_config::{Config, ConfigLoad, ConfigLoader, ConfigWarnings};
use vitrine_core::provider::DiskCacheStore;

mod cli;
mod fetch;
mod simulate;
mod sink;

use cli::{CacheCommand, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config.as_ref() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = cli.env_file.as_ref() {
        loader = loader.with_env_file(path);
    }
    let ConfigLoad { config, warnings } =
        loader.load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    for warning in warnings.iter() {
        warn!("{warning}");
    }

    match cli.command {
        Command::Fetch(args) => fetch::run(&config, args).await,
        Command::Simulate(args) => simulate::run(&config, args).await,
        Command::Cache(CacheCommand::Clear) => clear_cache(&config).await,
        Command::Config => print_config(&config, &warnings),
    }
}

async fn clear_cache(config: &Config) -> anyhow::Result<()> {
    let dir = &config.cache.dir;
    if !dir.exists() {
        println!("nothing to clear at {}", dir.display());
        return Ok(());
    }
    DiskCacheStore::new(config.cache_root())
        .clear()
        .await
        .with_context(|| format!("failed to clear {}", dir.display()))?;
    println!("cleared cache at {}", dir.display());
    Ok(())
}

fn print_config(
    config: &Config,
    warnings: &ConfigWarnings,
) -> anyhow::Result<()> {
    match &config.metadata.config_path {
        Some(path) => println!("# config file: {}", path.display()),
        None => println!("# config file: none"),
    }
    let rendered = toml::to_string_pretty(&config.to_file_config())
        .context("failed to render configuration")?;
    print!("{rendered}");
    for warning in warnings.iter() {
        println!("# warning: {warning}");
    }
    Ok(())
}
