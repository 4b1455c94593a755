//! RESTLab - Main Entry Point
//!
//! Loads the persisted workbench, prints the tabs and saved requests, and
//! sends the active tab when it has a URL. An optional first argument
//! replaces the active tab's URL before sending.

use std::sync::Arc;

use restlab::{AppConfig, Storage, render_envelope, render_sidebar, render_tab_strip};
use restlab_application::{KeyValueStore, Workbench};
use restlab_domain::TabEdit;
use restlab_infrastructure::{FileKeyValueStore, MemoryKeyValueStore, ReqwestHttpClient};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        storage = ?config.storage,
        "Starting RESTLab v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = Arc::new(ReqwestHttpClient::new()?);
    let url = std::env::args().nth(1);

    match config.storage {
        Storage::Directory(dir) => {
            let store = Arc::new(FileKeyValueStore::new(dir));
            run(Workbench::load(store, client), url).await
        }
        Storage::Memory => {
            let store = Arc::new(MemoryKeyValueStore::new());
            run(Workbench::load(store, client), url).await
        }
    }
}

async fn run<S: KeyValueStore>(
    workbench: Workbench<S, ReqwestHttpClient>,
    url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(url) = url {
        workbench.edit_tab(&workbench.active_tab().id, TabEdit::Url(url));
    }

    println!("Theme: {}", workbench.theme().load());
    println!();
    println!("Tabs");
    print!(
        "{}",
        render_tab_strip(&workbench.tabs(), workbench.active_index())
    );
    println!();
    println!("Saved requests");
    print!("{}", render_sidebar(&workbench.saved_groups()));
    println!();

    let active = workbench.active_tab();
    if active.url.trim().is_empty() {
        println!("Active tab has no URL; pass one as the first argument to send it.");
        return Ok(());
    }

    let envelope = workbench.send(&active.id).await?;
    println!("{}", render_envelope(&envelope)?);

    Ok(())
}
