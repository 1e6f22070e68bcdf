//! Shared application state.

use linkweave_core::LinkweaveConfig;
use linkweave_linking::ApplyOptions;
use linkweave_store::SqliteStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: LinkweaveConfig,
    pub store: SqliteStore,
    pub apply_options: ApplyOptions,
}

impl AppState {
    pub fn new(config: LinkweaveConfig, store: SqliteStore) -> Self {
        let apply_options = ApplyOptions {
            blog_path: config.blog_path.clone(),
        };
        Self {
            config,
            store,
            apply_options,
        }
    }
}
