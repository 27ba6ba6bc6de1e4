use serde::{Deserialize, Serialize};

use crate::registry::{RegistryItem, RegistryItemFile, RegistryItemType};

/// Registry role of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:file")]
    File,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Component => "registry:component",
            FileKind::Page => "registry:page",
            FileKind::File => "registry:file",
        }
    }
}

/// A file that exists only in memory until the materializer writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualFile {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl VirtualFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }
}

/// Component metadata plus its bundle of files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryComponent {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Bundle in write order; the primary component file is always first.
    pub files: Vec<VirtualFile>,
    pub dependencies: Vec<String>,
    pub registry_dependencies: Vec<String>,
}

impl RegistryComponent {
    /// Type tag carried by generated UI components.
    pub const KIND: &'static str = "components:ui";

    /// Registry metadata record describing this component (file contents omitted).
    pub fn to_registry_item(&self) -> RegistryItem {
        let files = self
            .files
            .iter()
            .map(|file| RegistryItemFile {
                path: file.path.clone(),
                file_type: file.kind.as_str().to_string(),
                content: None,
                target: None,
            })
            .collect();

        RegistryItem {
            name: self.name.to_lowercase(),
            item_type: RegistryItemType::Ui.as_str().to_string(),
            title: Some(self.name.clone()),
            description: non_empty(&self.description),
            dependencies: Some(self.dependencies.clone()),
            dev_dependencies: None,
            registry_dependencies: Some(self.registry_dependencies.clone()),
            files: Some(files),
            categories: None,
            meta: None,
            schema: None,
            tailwind: None,
            css_vars: None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Outcome of generating one component.
///
/// Files exist only on the `Generated` branch, so a failed result can never
/// carry a partial bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Generated { component: RegistryComponent },
    Failed { error: String },
}

impl GenerationResult {
    pub fn failed(error: impl Into<String>) -> Self {
        GenerationResult::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Generated { .. })
    }

    pub fn component(&self) -> Option<&RegistryComponent> {
        match self {
            GenerationResult::Generated { component } => Some(component),
            GenerationResult::Failed { .. } => None,
        }
    }

    pub fn files(&self) -> Option<&[VirtualFile]> {
        self.component().map(|component| component.files.as_slice())
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationResult::Generated { .. } => None,
            GenerationResult::Failed { error } => Some(error.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component() -> RegistryComponent {
        RegistryComponent {
            name: "FancyCard".to_string(),
            description: "A card".to_string(),
            kind: RegistryComponent::KIND.to_string(),
            files: vec![VirtualFile::new(
                "components/ui/fancycard.tsx",
                "export {}",
                FileKind::Component,
            )],
            dependencies: vec!["class-variance-authority".to_string()],
            registry_dependencies: vec!["utils".to_string()],
        }
    }

    #[test]
    fn files_present_only_on_success() {
        let ok = GenerationResult::Generated {
            component: component(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.files().map(<[VirtualFile]>::len), Some(1));
        assert!(ok.error().is_none());

        let failed = GenerationResult::failed("boom");
        assert!(!failed.is_success());
        assert!(failed.files().is_none());
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(GenerationResult::failed("boom")).expect("serialize");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn registry_item_lists_files_without_content() {
        let item = component().to_registry_item();
        assert_eq!(item.name, "fancycard");
        assert_eq!(item.kind(), Some(RegistryItemType::Ui));
        let files = item.files.expect("files");
        assert_eq!(files[0].path, "components/ui/fancycard.tsx");
        assert_eq!(files[0].file_type, "registry:component");
        assert!(files[0].content.is_none());
    }
}
