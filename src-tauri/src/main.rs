use std::path::PathBuf;

use anyhow::Context;
use directories::ProjectDirs;
use scrapbuddy_core::api::v1::{self, ApiState};
use scrapbuddy_core::config::Sources;
use scrapbuddy_core::db::{init_db, DbPool};
use scrapbuddy_core::KeyBroker;
use tauri::Manager;
use tracing_subscriber::EnvFilter;

fn workspace_dir() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("com", "ScrapBuddy", "ScrapBuddy") {
        proj.data_dir().to_path_buf()
    } else {
        std::env::temp_dir().join("ScrapBuddy")
    }
}

/// Route `log` records to stdout. Default level: INFO, override via RUST_LOG.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scrapbuddy_core=debug"));
    // `init` also installs the `log` -> tracing bridge.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .init();
}

fn build_broker(workspace: PathBuf, db: DbPool) -> anyhow::Result<KeyBroker> {
    let provider = Sources::standard(Some(workspace.join("secrets.json")))
        .with_store(db)
        .build()
        .context("failed to load key sources")?;
    Ok(KeyBroker::new(provider))
}

fn main() {
    init_logging();
    tauri::Builder::default()
        .setup(|app| {
            let workspace = workspace_dir();
            let db = init_db(workspace.clone()).context("failed to init credential store")?;
            let broker = build_broker(workspace, db.clone())?;
            log::info!("{} ready", v1::CHANNEL);
            app.manage(ApiState { broker, db });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            v1::api_keys_channel,
            v1::api_keys_status,
            v1::api_keys_store
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
