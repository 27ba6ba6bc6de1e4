use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Substring that marks a backup copy; [`cleanup_backups`] removes any entry
/// whose name contains it.
pub const BACKUP_MARKER: &str = ".backup.";

const MAX_BACKUP_ATTEMPTS: u32 = 1000;

/// Candidate backup path for `path`: `<path>.backup.<millis>`, then
/// `<path>.backup.<millis>-<attempt>` for later attempts.
pub fn backup_path_for(path: &Path, millis: i64, attempt: u32) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!("{BACKUP_MARKER}{millis}"));
    if attempt > 0 {
        name.push(format!("-{attempt}"));
    }
    PathBuf::from(name)
}

/// Copy `path` next to itself, never replacing an existing backup.
///
/// Returns `None` when the source does not exist or the copy fails.
pub(crate) async fn backup_file(path: &Path) -> Option<PathBuf> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return None,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(event = "backup_failed", path = %path.display(), error = %err);
            return None;
        }
    }

    let contents = match fs::read(path).await {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!(event = "backup_failed", path = %path.display(), error = %err);
            return None;
        }
    };

    let millis = chrono::Utc::now().timestamp_millis();
    for attempt in 0..MAX_BACKUP_ATTEMPTS {
        let candidate = backup_path_for(path, millis, attempt);
        match write_new(&candidate, &contents).await {
            Ok(()) => {
                tracing::info!(
                    event = "backup_created",
                    source = %path.display(),
                    backup = %candidate.display()
                );
                return Some(candidate);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                tracing::warn!(event = "backup_failed", path = %path.display(), error = %err);
                return None;
            }
        }
    }

    tracing::warn!(event = "backup_failed", path = %path.display(), error = "no free backup name");
    None
}

async fn write_new(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

/// Remove every entry below `root` whose name contains [`BACKUP_MARKER`].
///
/// Errors are logged and skipped; the removed paths are returned.
pub(crate) async fn cleanup_backups(root: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(event = "cleanup_failed", path = %dir.display(), error = %err);
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(event = "cleanup_failed", path = %dir.display(), error = %err);
                    break;
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(err) => {
                    tracing::warn!(event = "cleanup_failed", path = %path.display(), error = %err);
                    continue;
                }
            };

            let is_backup = entry.file_name().to_string_lossy().contains(BACKUP_MARKER);
            if !is_backup {
                if file_type.is_dir() {
                    pending.push(path);
                }
                continue;
            }

            let result = if file_type.is_dir() {
                fs::remove_dir_all(&path).await
            } else {
                fs::remove_file(&path).await
            };
            match result {
                Ok(()) => {
                    tracing::info!(event = "backup_removed", path = %path.display());
                    removed.push(path);
                }
                Err(err) => {
                    tracing::warn!(event = "cleanup_failed", path = %path.display(), error = %err);
                }
            }
        }
    }

    removed.sort();
    removed
}
