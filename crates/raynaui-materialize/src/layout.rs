use std::path::{Path, PathBuf};

use tokio::fs;

use crate::atomic::write_bytes_atomic;
use crate::errors::{MaterializeError, MaterializeResult};

/// Directories created by [`ProjectLayout::scaffold`].
pub const SCAFFOLD_DIRS: [&str; 5] = [
    "components/ui",
    "app/(app)/examples",
    "__tests__",
    "content/docs/components",
    "lib",
];

/// Directories a project needs before components can be written into it.
pub const REQUIRED_DIRS: [&str; 2] = ["components/ui", "lib"];

/// Project-relative location of the class-merging helper.
pub const UTILS_FILE: &str = "lib/utils.ts";

/// Content written to [`UTILS_FILE`] when it is missing.
pub const UTILS_CONTENT: &str = r#"import { type ClassValue, clsx } from "clsx"
import { twMerge } from "tailwind-merge"

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs))
}
"#;

/// Conventional file layout of a RaynaUI project rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created_dirs: Vec<String>,
    pub wrote_utils: bool,
}

/// Result of [`ProjectLayout::validate`]; `missing` keeps check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub missing: Vec<String>,
}

impl LayoutReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn components_dir(&self) -> PathBuf {
        self.root.join("components/ui")
    }

    pub fn utils_path(&self) -> PathBuf {
        self.root.join(UTILS_FILE)
    }

    /// Conventional path of a generated component source file.
    pub fn component_path(&self, name: &str) -> PathBuf {
        self.components_dir()
            .join(format!("{}.tsx", name.to_lowercase()))
    }

    /// Create the baseline directories and, only if absent, the utils helper.
    pub async fn scaffold(&self) -> MaterializeResult<ScaffoldReport> {
        let mut report = ScaffoldReport::default();
        for dir in SCAFFOLD_DIRS {
            let path = self.root.join(dir);
            if exists(&path).await {
                continue;
            }
            fs::create_dir_all(&path)
                .await
                .map_err(|err| MaterializeError::io(&path, err))?;
            report.created_dirs.push(dir.to_string());
        }

        let utils = self.utils_path();
        if !exists(&utils).await {
            write_bytes_atomic(&utils, UTILS_CONTENT.as_bytes())
                .await
                .map_err(|err| MaterializeError::io(&utils, err))?;
            report.wrote_utils = true;
        }

        tracing::info!(
            event = "project_scaffolded",
            root = %self.root.display(),
            created_dirs = report.created_dirs.len(),
            wrote_utils = report.wrote_utils
        );
        Ok(report)
    }

    /// Report which required entries are missing without creating anything.
    pub async fn validate(&self) -> LayoutReport {
        let mut report = LayoutReport::default();
        for dir in REQUIRED_DIRS {
            if !is_dir(&self.root.join(dir)).await {
                report.missing.push(dir.to_string());
            }
        }
        if !is_file(&self.utils_path()).await {
            report.missing.push(UTILS_FILE.to_string());
        }
        report
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_path_is_lowercase() {
        let layout = ProjectLayout::new("/project");
        assert_eq!(
            layout.component_path("FancyCard"),
            PathBuf::from("/project/components/ui/fancycard.tsx")
        );
    }

    #[tokio::test]
    async fn empty_directory_misses_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = ProjectLayout::new(dir.path()).validate().await;
        assert!(!report.is_valid());
        assert_eq!(report.missing, vec!["components/ui", "lib", "lib/utils.ts"]);
    }
}
