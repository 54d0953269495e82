use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pageshot_core::{content_type_for, IMAGE_PREFIX};
use pageshot_logging::{shot_debug, shot_error, shot_info, shot_warn};
use tempfile::TempDir;
use thiserror::Error;

const STAGING_PREFIX: &str = ".staging-";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("screenshot with ID '{0}' not found")]
    NotFound(String),
    #[error("unable to read images directory: {0}")]
    DirectoryRead(io::Error),
    #[error("images directory missing or not writable: {0}")]
    ImagesDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the images directory exists; create it (and parents) if missing.
///
/// Staging directories left behind by an interrupted run are removed.
pub fn ensure_images_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StoreError::ImagesDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StoreError::ImagesDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StoreError::ImagesDir(e.to_string()))?;
    }
    sweep_staging(dir)
}

fn sweep_staging(dir: &Path) -> Result<(), StoreError> {
    for entry in fs::read_dir(dir).map_err(StoreError::DirectoryRead)? {
        let entry = entry.map_err(StoreError::DirectoryRead)?;
        let is_staging = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(STAGING_PREFIX));
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if !(is_staging && is_dir) {
            continue;
        }
        match fs::remove_dir_all(entry.path()) {
            Ok(()) => shot_info!("Removed stale staging directory {:?}", entry.path()),
            Err(err) => shot_warn!("Unable to remove {:?}: {}", entry.path(), err),
        }
    }
    Ok(())
}

/// An artifact opened for streaming.
#[derive(Debug)]
pub struct ArtifactFile {
    pub file: tokio::fs::File,
    pub len: u64,
    pub content_type: &'static str,
}

/// Flat directory of `pageshot-<id>` files.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Ids of every artifact, sorted by name.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(StoreError::DirectoryRead)?;
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(StoreError::DirectoryRead)? {
            let is_file = entry
                .file_type()
                .await
                .map(|ft| ft.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_prefix(IMAGE_PREFIX))
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub async fn open(&self, id: &str) -> Result<ArtifactFile, StoreError> {
        let path = self.artifact_path(id)?;
        let not_found = || StoreError::NotFound(id.to_string());

        let meta = tokio::fs::metadata(&path).await.map_err(|_| not_found())?;
        if !meta.is_file() {
            return Err(not_found());
        }
        let file = tokio::fs::File::open(&path).await.map_err(|_| not_found())?;
        Ok(ArtifactFile {
            file,
            len: meta.len(),
            content_type: content_type_for(id),
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.artifact_path(id)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|_| StoreError::NotFound(id.to_string()))?;
        shot_info!("Deleted artifact {}", id);
        Ok(())
    }

    /// Private scratch directory for one capture; removed when dropped.
    pub fn staging_dir(&self) -> Result<TempDir, StoreError> {
        Ok(tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.dir)?)
    }

    /// Move every staged file whose name starts with `stem` into the store.
    ///
    /// All or nothing: if one rename fails, files already moved go back to
    /// `staging`. Returns the promoted ids, sorted.
    pub async fn promote(&self, staging: &Path, stem: &str) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(staging).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(stem) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        let mut moved: Vec<&str> = Vec::new();
        for name in &names {
            if let Err(err) = tokio::fs::rename(staging.join(name), self.dir.join(name)).await {
                shot_error!("Unable to publish {}: {}", name, err);
                self.withdraw(staging, &moved).await;
                return Err(err.into());
            }
            shot_debug!("Promoted {} from {:?}", name, staging);
            moved.push(name);
        }

        Ok(moved
            .iter()
            .filter_map(|name| name.strip_prefix(IMAGE_PREFIX))
            .map(str::to_string)
            .collect())
    }

    async fn withdraw(&self, staging: &Path, moved: &[&str]) {
        for name in moved {
            let published = self.dir.join(name);
            if tokio::fs::rename(&published, staging.join(name)).await.is_ok() {
                continue;
            }
            if let Err(err) = tokio::fs::remove_file(&published).await {
                shot_warn!("Unable to withdraw {:?}: {}", published, err);
            }
        }
    }

    fn artifact_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if !is_safe_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.dir.join(format!("{IMAGE_PREFIX}{id}")))
    }
}

fn is_safe_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}
