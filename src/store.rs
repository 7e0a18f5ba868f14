//! In-memory record store.
//!
//! Holds the evaluation-type catalog, every school year and each year's
//! records. The store is shared as `Arc<RwLock<SchoolStore>>`; one lock per
//! request makes every operation all-or-nothing. When a dataset path is
//! configured, mutations are written back to it as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};
use yearbook_models::ids::SchoolYearId;
use yearbook_models::school_years::register_new;
use yearbook_models::{Dataset, DependentCounts, EvaluationType, SchoolYear, YearRecords};

static EMPTY_RECORDS: YearRecords = YearRecords {
    sections: Vec::new(),
    mention_sections: Vec::new(),
    enrollments: Vec::new(),
    professors: Vec::new(),
    subjects: Vec::new(),
    evaluations: Vec::new(),
    scores: Vec::new(),
};

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[derive(Debug, Default)]
pub struct SchoolStore {
    data: Dataset,
    path: Option<PathBuf>,
}

impl SchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(data: Dataset) -> Self {
        Self { data, path: None }
    }

    /// Loads `path`, or starts empty when the file does not exist yet.
    /// Either way later mutations are saved to `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read dataset {}", path.display()))?;
            let data: Dataset = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid dataset {}", path.display()))?;
            for problem in data.problems() {
                warn!(path = %path.display(), problem = %problem, "Dataset inconsistency");
            }
            info!(
                path = %path.display(),
                years = data.school_years.len(),
                "Dataset loaded"
            );
            data
        } else {
            info!(path = %path.display(), "Dataset not found, starting empty");
            Dataset::default()
        };

        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// Writes the dataset back to its file through a sibling temp file and a
    /// rename, so readers never see a half-written dataset. No-op for
    /// in-memory stores.
    pub async fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        let staging = staging_path(path);
        tokio::fs::write(&staging, json)
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        if let Err(e) = tokio::fs::rename(&staging, path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
        }
        Ok(())
    }

    /// Runs `op` and persists the result as one unit.
    ///
    /// When `op` or the save fails the dataset is restored to what it was
    /// before the call, so memory and disk never disagree.
    pub async fn commit<T, E>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        let snapshot = self.data.clone();
        let value = match op(self) {
            Ok(value) => value,
            Err(e) => {
                self.data = snapshot;
                return Err(e);
            }
        };
        if let Err(e) = self.save().await {
            warn!(error = %format!("{:#}", e), "Dataset save failed, changes rolled back");
            self.data = snapshot;
            return Err(E::from(e));
        }
        Ok(value)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn catalog(&self) -> &[EvaluationType] {
        &self.data.evaluation_types
    }

    pub fn years(&self) -> &[SchoolYear] {
        &self.data.school_years
    }

    pub fn years_mut(&mut self) -> &mut Vec<SchoolYear> {
        &mut self.data.school_years
    }

    pub fn year(&self, id: SchoolYearId) -> Option<&SchoolYear> {
        self.data.school_years.iter().find(|year| year.id == id)
    }

    pub fn year_mut(&mut self, id: SchoolYearId) -> Option<&mut SchoolYear> {
        self.data.school_years.iter_mut().find(|year| year.id == id)
    }

    pub fn current_year(&self) -> Option<&SchoolYear> {
        self.data.school_years.iter().find(|year| year.current)
    }

    /// Records of `id`; empty when nothing was synced yet.
    pub fn records(&self, id: SchoolYearId) -> &YearRecords {
        self.data.records.get(&id).unwrap_or(&EMPTY_RECORDS)
    }

    pub fn counts(&self, id: SchoolYearId) -> DependentCounts {
        self.records(id).dependent_counts()
    }

    /// Adds a new year, which takes over the current flag.
    pub fn insert_year(&mut self, year: SchoolYear) -> &SchoolYear {
        register_new(&mut self.data.school_years, year)
    }

    pub fn remove_year(&mut self, id: SchoolYearId) -> Option<SchoolYear> {
        let index = self.data.school_years.iter().position(|year| year.id == id)?;
        self.data.records.remove(&id);
        Some(self.data.school_years.remove(index))
    }

    pub fn replace_records(&mut self, id: SchoolYearId, records: YearRecords) {
        self.data.records.insert(id, records);
    }
}
