pub mod config;
pub mod link;
pub mod stats;
pub mod task;
pub mod timer;

use focusdesk_core::{Config, Database, TaskStore};

/// Open the on-disk store with the configured month grouping.
pub fn open_store() -> Result<TaskStore<Database>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    tracing::debug!(month_grouping = ?config.stats.month_grouping, "opening store");
    Ok(TaskStore::open(Database::open()?).with_month_grouping(config.stats.month_grouping))
}
