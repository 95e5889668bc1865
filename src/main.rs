use anyhow::Result;
use fleetdash::api::ApiClient;
use fleetdash::auth::{SessionStore, TokenProvider};
use fleetdash::config::Config;
use fleetdash::query::FilterStore;
use fleetdash::ui::{self, core::AppContext};
use fleetdash::logger;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--init-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = Config::load()?;
    if let Some(path) = logger::init(&config.logging)? {
        log::info!("fleetdash starting, logging to {}", path.display());
    }

    let session = SessionStore::open_default(&config.api.token_env)?;
    if session.token().is_none() {
        eprintln!("❌ Error: no API token found");
        eprintln!("\n💡 To use this app:");
        eprintln!("1. Get a token for {}", config.api.base_url);
        eprintln!("2. Set it as environment variable: export {}=your_token_here", config.api.token_env);
        eprintln!("3. Run the app again to see your fleet!");
        return Ok(());
    }
    if session.token_from_env() {
        log::info!("Using API token from ${}", config.api.token_env);
    }

    let client = ApiClient::from_config(&config.api, Arc::new(session))?;

    let store_path = FilterStore::get_store_file_path()?;
    let store = FilterStore::load_from_file(&store_path).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable filter store: {e}");
        FilterStore::new()
    });

    let ctx = AppContext::new(config, client, store.clone());
    let res = ui::run_app(ctx).await;

    if let Err(e) = store.save_to_file(&store_path) {
        log::warn!("Failed to save filter store: {e}");
    }

    res
}
