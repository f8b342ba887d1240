pub mod config;
pub mod grid;
pub mod session;
pub mod suggest;
pub mod time;

use std::path::Path;

use bullplanner_core::{NewScheduleItem, ScheduleStore};

/// Read a JSON array of new items into a fresh store.
pub fn load_schedule(path: &Path) -> Result<ScheduleStore, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let items: Vec<NewScheduleItem> = serde_json::from_str(&raw)?;
    let mut store = ScheduleStore::new();
    store.add_all(items)?;
    tracing::debug!(path = %path.display(), items = store.len(), "schedule loaded");
    Ok(store)
}

/// Runtime for the one async call a command makes.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
}
