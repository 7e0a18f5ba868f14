use std::sync::Arc;

use tokio::sync::RwLock;
use yearbook_config::{CorsConfig, StoreConfig};

use crate::store::SchoolStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<RwLock<SchoolStore>>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: SchoolStore, cors_config: CorsConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            cors_config,
        }
    }
}

/// Builds the state from the environment, loading the dataset when
/// `YEARBOOK_DATASET` is set.
pub fn init_app_state() -> anyhow::Result<AppState> {
    let store = match StoreConfig::from_env().dataset {
        Some(path) => SchoolStore::load(path)?,
        None => SchoolStore::new(),
    };

    Ok(AppState::new(store, CorsConfig::from_env()))
}
