use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Write `data` to `path` through a synced sibling temp file and a rename,
/// creating missing parent directories first.
pub async fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = temp_path(path)?;
    if let Err(err) = write_synced(&tmp_path, data).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err);
    }
    if let Some(parent) = parent {
        sync_dir(parent).await?;
    }

    Ok(())
}

async fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .await?;
    file.write_all(data).await?;
    file.sync_all().await
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    let tmp_name = format!(".{}.{}.tmp", file_name.to_string_lossy(), short_id());
    Ok(path.with_file_name(tmp_name))
}

fn short_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    match id.split('-').next() {
        Some(part) if !part.is_empty() => part.to_string(),
        _ => id,
    }
}

#[cfg(unix)]
async fn sync_dir(path: &Path) -> io::Result<()> {
    fs::File::open(path).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parents_and_replaces_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("a/b/file.txt");

        write_bytes_atomic(&target, b"first").await.expect("write");
        write_bytes_atomic(&target, b"second").await.expect("rewrite");

        assert_eq!(fs::read_to_string(&target).await.expect("read"), "second");
        let mut entries = fs::read_dir(dir.path().join("a/b")).await.expect("list");
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.expect("entry") {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["file.txt".to_string()]);
    }

    #[test]
    fn temp_names_are_hidden_siblings() {
        let tmp = temp_path(Path::new("dir/button.tsx")).expect("temp path");
        assert_eq!(tmp.parent(), Some(Path::new("dir")));
        let name = tmp.file_name().expect("name").to_string_lossy().into_owned();
        assert!(name.starts_with(".button.tsx."));
        assert!(name.ends_with(".tmp"));
    }
}
