use std::{
    fs,
    path::{Path, PathBuf},
};

use ferrum_domain::{
    Catalog, CatalogRepository, Progress, ProgressRepository, ReadError, StorageError, UpdateError,
};
use log::warn;
use serde::Serialize;

use crate::document::{ConfigDocument, ProgressDocument};

/// Whole-document JSON file persistence for the configuration and the
/// progress log. A missing progress log yields fresh defaults; an
/// unreadable one is backed up aside and replaced with defaults rather
/// than failing the load.
pub struct FileStore {
    config_path: PathBuf,
    progress_path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(config_path: impl Into<PathBuf>, progress_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            progress_path: progress_path.into(),
        }
    }

    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("config.json"), dir.join("progress.json"))
    }

    fn backup_corrupt_file(path: &Path) {
        let backup = path.with_extension("json.bak");
        match fs::rename(path, &backup) {
            Ok(()) => warn!(
                "backed up corrupt document {} to {}",
                path.display(),
                backup.display()
            ),
            Err(err) => warn!("failed to back up corrupt document {}: {err}", path.display()),
        }
    }
}

impl CatalogRepository for FileStore {
    fn load_catalog(&self) -> Result<Catalog, ReadError> {
        if !self.config_path.exists() {
            return Ok(Catalog::builtin());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(StorageError::from)
            .map_err(ReadError::from)?;

        match serde_json::from_str::<ConfigDocument>(&content) {
            Ok(document) => Ok(document.into()),
            Err(err) => {
                warn!("malformed configuration document: {err}");
                Ok(Catalog::default())
            }
        }
    }

    fn store_catalog(&self, catalog: &Catalog) -> Result<(), UpdateError> {
        write_document(&self.config_path, &ConfigDocument::from(catalog))
    }
}

impl ProgressRepository for FileStore {
    fn load_progress(&self) -> Result<Progress, ReadError> {
        if !self.progress_path.exists() {
            return Ok(Progress::default());
        }

        let content = match fs::read_to_string(&self.progress_path) {
            Ok(content) => content,
            Err(err) => {
                warn!("unreadable progress log: {err}");
                Self::backup_corrupt_file(&self.progress_path);
                return Ok(Progress::default());
            }
        };

        match serde_json::from_str::<ProgressDocument>(&content) {
            Ok(document) => Ok(document.into()),
            Err(err) => {
                warn!("malformed progress log: {err}");
                Self::backup_corrupt_file(&self.progress_path);
                Ok(Progress::default())
            }
        }
    }

    fn store_progress(&self, progress: &Progress) -> Result<(), UpdateError> {
        write_document(&self.progress_path, &ProgressDocument::from(progress))
    }
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), UpdateError> {
    let content = serde_json::to_string_pretty(document)
        .map_err(|err| StorageError::Malformed(err.to_string()))?;
    fs::write(path, content).map_err(StorageError::from)?;
    Ok(())
}
