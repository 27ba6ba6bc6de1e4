use std::path::{Component, Path, PathBuf};

use raynaui_core::{GenerationResult, VirtualFile, WriteOptions};
use tokio::fs;

use crate::atomic::write_bytes_atomic;
use crate::backup::{backup_file, cleanup_backups};
use crate::errors::WriteError;
use crate::layout::ProjectLayout;

/// Outcome of writing one bundle. Partial writes are possible: `written`
/// lists what landed, `errors` what did not.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub errors: Vec<WriteError>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct BatchWriteReport {
    pub total_files: usize,
    pub errors: Vec<WriteError>,
}

impl BatchWriteReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Writes component bundles below a base directory fixed at construction.
#[derive(Debug, Clone)]
pub struct FileMaterializer {
    base_dir: PathBuf,
}

impl FileMaterializer {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Layout rooted at the base directory.
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.base_dir.clone())
    }

    /// Directory a bundle is written into: `output_dir` resolved against the
    /// base directory, or the base directory itself.
    pub fn output_root(&self, options: &WriteOptions) -> PathBuf {
        match &options.output_dir {
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }

    /// Write every file of a generated bundle.
    ///
    /// A failed result yields a single [`WriteError::NoFiles`]. Otherwise each
    /// file is handled independently and an existing target is only replaced
    /// when `overwrite` is set.
    pub async fn write_bundle(
        &self,
        result: &GenerationResult,
        options: &WriteOptions,
    ) -> WriteReport {
        let mut report = WriteReport::default();
        let files = match result.files() {
            Some(files) if !files.is_empty() => files,
            _ => {
                report.errors.push(WriteError::NoFiles);
                return report;
            }
        };

        let root = self.output_root(options);
        for file in files {
            match write_file(&root, file, options.overwrite).await {
                Ok(()) => {
                    tracing::info!(event = "file_written", path = %file.path);
                    report.written.push(file.path.clone());
                }
                Err(err) => {
                    tracing::warn!(event = "file_skipped", path = %file.path, error = %err);
                    report.errors.push(err);
                }
            }
        }
        report
    }

    /// Write each bundle in order, accumulating counts and errors.
    pub async fn write_multiple_bundles(
        &self,
        results: &[GenerationResult],
        options: &WriteOptions,
    ) -> BatchWriteReport {
        let mut batch = BatchWriteReport::default();
        for result in results {
            let report = self.write_bundle(result, options).await;
            batch.total_files += report.written.len();
            batch.errors.extend(report.errors);
        }
        batch
    }

    /// Contents of a previously generated component, if it can be read.
    pub async fn read_existing(&self, component_name: &str) -> Option<String> {
        let path = self.layout().component_path(component_name);
        match fs::read_to_string(&path).await {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(event = "read_existing_failed", path = %path.display(), error = %err);
                None
            }
        }
    }

    /// Copy `path` (relative paths resolve against the base directory) to a
    /// fresh `.backup.<millis>` sibling.
    pub async fn backup(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        backup_file(&self.base_dir.join(path.as_ref())).await
    }

    /// Back up every file of `result` that already exists under the output
    /// root `write_bundle` would use for `options`.
    pub async fn backup_bundle(
        &self,
        result: &GenerationResult,
        options: &WriteOptions,
    ) -> Vec<PathBuf> {
        let root = self.output_root(options);
        let mut backups = Vec::new();
        for file in result.files().unwrap_or_default() {
            let relative = Path::new(&file.path);
            if !is_contained(relative) {
                continue;
            }
            if let Some(backup) = backup_file(&root.join(relative)).await {
                backups.push(backup);
            }
        }
        backups
    }

    /// Delete every backup copy below the base directory.
    pub async fn cleanup_backups(&self) -> Vec<PathBuf> {
        cleanup_backups(&self.base_dir).await
    }
}

async fn write_file(root: &Path, file: &VirtualFile, overwrite: bool) -> Result<(), WriteError> {
    let relative = Path::new(&file.path);
    if !is_contained(relative) {
        return Err(WriteError::InvalidPath {
            path: file.path.clone(),
        });
    }
    let target = root.join(relative);
    let io_error = |source| WriteError::Io {
        path: file.path.clone(),
        source,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    if !overwrite && fs::try_exists(&target).await.map_err(io_error)? {
        return Err(WriteError::Conflict {
            path: file.path.clone(),
        });
    }
    write_bytes_atomic(&target, file.content.as_bytes())
        .await
        .map_err(io_error)
}

/// True for non-empty relative paths that never climb above their root.
fn is_contained(path: &Path) -> bool {
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    depth > 0
}
