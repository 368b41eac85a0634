//! watchpost - Interactive endpoint monitor
//!
//! Define named endpoint profiles, pick one, and watch a foreground polling
//! loop probe it on a fixed interval.

mod app;
mod config;
mod probe;
mod store;
mod ui;

use clap::Parser;
use std::fs;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Config;
use store::ProfileStore;
use ui::Theme;

/// Interactive terminal monitor for HTTP endpoints.
#[derive(Parser)]
#[command(version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Cli::parse();

    let cfg = Config::load();
    if let Some(dir) = cfg.profiles_path.parent() {
        fs::create_dir_all(dir)?;
    }
    if let Some(dir) = cfg.log_path.parent() {
        fs::create_dir_all(dir)?;
    }

    // The UI owns the terminal, so logs go to a file.
    let log_file = fs::File::create(&cfg.log_path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("watchpost=info".parse()?),
        )
        .init();

    let store = ProfileStore::open(&cfg.profiles_path).unwrap_or_else(|e| {
        tracing::warn!("could not load profiles: {e}");
        ProfileStore::empty(&cfg.profiles_path)
    });
    tracing::info!(
        "loaded {} profiles from {}",
        store.profiles().len(),
        cfg.profiles_path.display()
    );

    app::run(App::new(store), Theme::default()).await?;

    Ok(())
}
