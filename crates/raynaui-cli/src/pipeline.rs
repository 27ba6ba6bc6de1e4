use std::path::{Path, PathBuf};

use raynaui_core::{GenerationOptions, GenerationResult};
use raynaui_generate::GenerationEngine;
use raynaui_materialize::{
    BatchWriteReport, FileMaterializer, LayoutReport, MaterializeResult, ProjectLayout,
    ScaffoldReport, WriteReport,
};

/// One generation and what happened when it was written.
#[derive(Debug)]
pub struct GeneratedComponent {
    pub generation: GenerationResult,
    pub report: WriteReport,
}

#[derive(Debug)]
pub struct GeneratedBatch {
    pub generations: Vec<GenerationResult>,
    pub report: BatchWriteReport,
}

/// Engine plus materializer behind a single entry point.
#[derive(Debug, Clone)]
pub struct ComponentGenerator {
    engine: GenerationEngine,
    materializer: FileMaterializer,
}

impl ComponentGenerator {
    pub fn new(engine: GenerationEngine, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            materializer: FileMaterializer::new(base_dir),
        }
    }

    pub fn materializer(&self) -> &FileMaterializer {
        &self.materializer
    }

    pub async fn generate_component(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> GenerationResult {
        self.engine.generate_component(prompt, options).await
    }

    pub async fn generate_and_write_component(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> GeneratedComponent {
        let generation = self.generate_component(prompt, options).await;
        let report = self
            .materializer
            .write_bundle(&generation, &options.write_options())
            .await;
        GeneratedComponent { generation, report }
    }

    pub async fn generate_multiple_components<S: AsRef<str>>(
        &self,
        prompts: &[S],
        options: &GenerationOptions,
    ) -> Vec<GenerationResult> {
        self.engine
            .generate_multiple_components(prompts, options)
            .await
    }

    pub async fn generate_and_write_multiple_components<S: AsRef<str>>(
        &self,
        prompts: &[S],
        options: &GenerationOptions,
    ) -> GeneratedBatch {
        let generations = self.generate_multiple_components(prompts, options).await;
        let report = self
            .materializer
            .write_multiple_bundles(&generations, &options.write_options())
            .await;
        GeneratedBatch {
            generations,
            report,
        }
    }

    /// Scaffold the layout in `dir`, resolved against the base directory.
    pub async fn initialize_project(&self, dir: &Path) -> MaterializeResult<ScaffoldReport> {
        self.layout_at(dir).scaffold().await
    }

    pub async fn validate_project(&self, dir: &Path) -> LayoutReport {
        self.layout_at(dir).validate().await
    }

    /// Back up every file of `generation` that already exists on disk.
    pub async fn backup_existing(
        &self,
        generation: &GenerationResult,
        options: &GenerationOptions,
    ) -> Vec<PathBuf> {
        self.materializer
            .backup_bundle(generation, &options.write_options())
            .await
    }

    fn layout_at(&self, dir: &Path) -> ProjectLayout {
        ProjectLayout::new(self.materializer.base_dir().join(dir))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use raynaui_generate::{
        CompletionClient, CompletionRequest, CompletionResponse, ContentBlock, EngineConfig,
        GenerateError,
    };

    use super::*;

    /// Picks the component name from keywords in the description.
    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, GenerateError> {
            let user = &request.messages[0].content;
            let text = if user.contains("refuse") {
                "I won't do that.".to_string()
            } else {
                let name = if user.contains("alert") { "Alert" } else { "Badge" };
                format!("{{\"name\":\"{name}\",\"description\":\"generated\"}}")
            };
            Ok(CompletionResponse {
                content: vec![ContentBlock::Text { text }],
                stop_reason: None,
            })
        }
    }

    fn generator(dir: &Path) -> ComponentGenerator {
        let engine = GenerationEngine::with_client(
            EngineConfig::default().with_api_key("test"),
            Arc::new(EchoClient),
        );
        ComponentGenerator::new(engine, dir)
    }

    #[tokio::test]
    async fn generate_and_write_places_bundle_under_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = generator(dir.path());

        let outcome = generator
            .generate_and_write_component("a badge", &GenerationOptions::DEFAULT)
            .await;

        assert!(outcome.generation.is_success());
        assert!(outcome.report.is_success());
        assert_eq!(outcome.report.written.len(), 3);
        assert!(dir.path().join("components/ui/badge.tsx").is_file());
        assert!(dir.path().join("content/docs/components/badge.mdx").is_file());
    }

    #[tokio::test]
    async fn batch_writes_successes_and_reports_failures() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = generator(dir.path());
        let options = GenerationOptions {
            include_example: false,
            include_documentation: false,
            ..GenerationOptions::DEFAULT
        };

        let batch = generator
            .generate_and_write_multiple_components(&["a badge", "please refuse", "an alert"], &options)
            .await;

        assert_eq!(batch.generations.len(), 3);
        assert!(!batch.generations[1].is_success());
        assert_eq!(batch.report.total_files, 2);
        assert_eq!(batch.report.errors.len(), 1);
        assert!(dir.path().join("components/ui/alert.tsx").is_file());
    }

    #[tokio::test]
    async fn project_scaffold_and_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = generator(dir.path());

        assert!(!generator.validate_project(Path::new(".")).await.is_valid());
        generator
            .initialize_project(Path::new("."))
            .await
            .expect("scaffold");
        assert!(generator.validate_project(Path::new(".")).await.is_valid());
    }

    #[tokio::test]
    async fn backups_cover_only_existing_targets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = generator(dir.path());
        let options = GenerationOptions::DEFAULT;

        let generation = generator.generate_component("a badge", &options).await;
        assert!(generator.backup_existing(&generation, &options).await.is_empty());

        generator
            .materializer()
            .write_bundle(&generation, &options.write_options())
            .await;
        let backups = generator.backup_existing(&generation, &options).await;
        assert_eq!(backups.len(), 3);
    }

    #[tokio::test]
    async fn backups_find_files_under_relative_base() {
        let dir = tempfile::Builder::new()
            .prefix("rel-out")
            .tempdir_in(".")
            .expect("tempdir");
        let relative = Path::new(dir.path().file_name().expect("dir name"));
        let generator = generator(relative);
        let options = GenerationOptions::DEFAULT;

        let generation = generator.generate_component("a badge", &options).await;
        generator
            .materializer()
            .write_bundle(&generation, &options.write_options())
            .await;
        let backups = generator.backup_existing(&generation, &options).await;

        assert_eq!(backups.len(), 3);
        assert!(backups.iter().all(|backup| backup.starts_with(relative)));
    }
}
