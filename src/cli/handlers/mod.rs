mod mutate;
mod query;
mod schema;
mod serve;
mod utils;

pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::BookshelfConfig;
use crate::storage::{self, SharedStore};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: BookshelfConfig,
    pub store: SharedStore,
}

impl CommandContext {
    /// Opens the configured store. Never fails: an unusable store is logged
    /// and replaced by one that rejects every operation.
    pub async fn open(config: BookshelfConfig) -> Self {
        let store = storage::open(&config.store).await;
        Self { config, store }
    }

    pub async fn close(self) {
        if let Err(e) = self.store.close().await {
            tracing::warn!(error = %e, "Failed to close store");
        }
    }
}
