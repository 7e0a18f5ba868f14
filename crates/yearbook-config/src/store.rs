use std::env;
use std::path::PathBuf;

/// Where the record store reads its initial data from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON dataset to load at startup. The store starts empty when unset.
    pub dataset: Option<PathBuf>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            dataset: env::var("YEARBOOK_DATASET")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}
