//! elysium-cache - answer cache queries from the command line.
//!
//! Loads a snapshot into the channel and emoji caches, then reads one JSON
//! request per line from stdin and writes one JSON response per line.

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use elysium_cache::cache::CacheRegistry;
use elysium_cache::config::{Config, LogFormat};
use elysium_cache::query::Manager;
use elysium_cache::request::RequestHandler;
use elysium_cache::snapshot::Snapshot;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // If RUST_LOG is not set, default to "info" level for our crate.
    // Logs go to stderr; stdout carries responses.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("elysium_cache=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match config.log_format {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting elysium-cache...");
    info!("Snapshot: {}", config.snapshot_path.display());

    let registry = CacheRegistry::new();
    let populated = Snapshot::from_path(&config.snapshot_path)?
        .populate(&registry, config.cache_capacity)?;

    let handler = RequestHandler::new(
        Manager::new(populated.channels),
        Manager::new(populated.emojis),
    );

    handler.serve(io::stdin().lock(), io::stdout().lock())?;

    info!("Input closed, exiting");
    Ok(())
}
