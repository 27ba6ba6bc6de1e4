use std::sync::Arc;

use raynaui_core::{
    ComponentGeneration, ComponentTemplate, FileKind, GenerationOptions, GenerationResult,
    RegistryComponent, VirtualFile,
};

use crate::client::{AnthropicClient, CompletionClient, CompletionRequest};
use crate::config::EngineConfig;
use crate::errors::GenerateError;
use crate::parser::parse_response;
use crate::prompt::build_prompts;
use crate::templates::render_component_template;

/// Drives prompt building, the model call, parsing and rendering.
///
/// Failures never escape as `Err`: every call yields a [`GenerationResult`]
/// carrying either the component bundle or an error message.
#[derive(Clone)]
pub struct GenerationEngine {
    client: Arc<dyn CompletionClient>,
    config: EngineConfig,
}

impl std::fmt::Debug for GenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GenerationEngine {
    /// Engine backed by the hosted API. Fails when no API key is configured.
    pub fn new(config: EngineConfig) -> Result<Self, GenerateError> {
        let client = AnthropicClient::from_config(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: EngineConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn generate_component(
        &self,
        description: &str,
        options: &GenerationOptions,
    ) -> GenerationResult {
        match self.try_generate(description, options).await {
            Ok(component) => {
                tracing::info!(
                    event = "component_generated",
                    name = %component.name,
                    files = component.files.len()
                );
                GenerationResult::Generated { component }
            }
            Err(err) => {
                tracing::warn!(event = "component_failed", error = %err);
                GenerationResult::failed(err.to_string())
            }
        }
    }

    /// Generate one component per description, strictly in input order.
    pub async fn generate_multiple_components<S: AsRef<str>>(
        &self,
        descriptions: &[S],
        options: &GenerationOptions,
    ) -> Vec<GenerationResult> {
        let mut results = Vec::with_capacity(descriptions.len());
        for (index, description) in descriptions.iter().enumerate() {
            tracing::debug!(
                event = "batch_item",
                index,
                total = descriptions.len()
            );
            results.push(self.generate_component(description.as_ref(), options).await);
        }
        results
    }

    async fn try_generate(
        &self,
        description: &str,
        options: &GenerationOptions,
    ) -> Result<RegistryComponent, GenerateError> {
        let prompts = build_prompts(description, options);
        let request = CompletionRequest::new(&self.config, prompts);
        let response = self.client.complete(&request).await?;
        let text = response.first_text()?;
        let generation = parse_response(text)?;
        tracing::debug!(
            event = "response_parsed",
            name = %generation.name,
            props = generation.props.len(),
            variants = generation.variants.len()
        );
        let template = render_component_template(&generation, options.style);
        Ok(assemble_component(generation, template, options))
    }
}

/// Build the file bundle for a rendered component.
///
/// The primary component file is always first; the example, test and
/// documentation files follow when their option is enabled and the rendered
/// artifact is non-empty.
pub fn assemble_component(
    generation: ComponentGeneration,
    template: ComponentTemplate,
    options: &GenerationOptions,
) -> RegistryComponent {
    let stem = generation.file_stem();
    let mut files = vec![VirtualFile::new(
        format!("components/ui/{stem}.tsx"),
        template.component,
        FileKind::Component,
    )];

    if options.include_example && !template.example.is_empty() {
        files.push(VirtualFile::new(
            format!("app/(app)/examples/{stem}/page.tsx"),
            template.example,
            FileKind::Page,
        ));
    }
    if options.include_test && !template.test.is_empty() {
        files.push(VirtualFile::new(
            format!("__tests__/{stem}.test.tsx"),
            template.test,
            FileKind::File,
        ));
    }
    if options.include_documentation && !template.documentation.is_empty() {
        files.push(VirtualFile::new(
            format!("content/docs/components/{stem}.mdx"),
            template.documentation,
            FileKind::File,
        ));
    }

    RegistryComponent {
        name: generation.name,
        description: generation.description,
        kind: RegistryComponent::KIND.to_string(),
        files,
        dependencies: generation.dependencies,
        registry_dependencies: generation.registry_dependencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raynaui_core::Style;

    #[test]
    fn bundle_follows_options() {
        let generation = ComponentGeneration::new("Card", "a card");
        let template = render_component_template(&generation, Style::NewYork);
        let component = assemble_component(generation, template, &GenerationOptions::DEFAULT);

        let paths: Vec<&str> = component.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "components/ui/card.tsx",
                "app/(app)/examples/card/page.tsx",
                "content/docs/components/card.mdx",
            ]
        );
        assert_eq!(component.kind, "components:ui");
        assert_eq!(component.files[0].kind, FileKind::Component);
    }

    #[test]
    fn minimal_options_keep_only_component() {
        let generation = ComponentGeneration::new("Card", "a card");
        let template = render_component_template(&generation, Style::Default);
        let options = GenerationOptions {
            include_example: false,
            include_documentation: false,
            include_test: false,
            ..GenerationOptions::DEFAULT
        };
        let component = assemble_component(generation, template, &options);
        assert_eq!(component.files.len(), 1);
    }

    #[test]
    fn empty_artifacts_are_left_out() {
        let generation = ComponentGeneration::new("Card", "a card");
        let template = ComponentTemplate {
            component: "export {}".to_string(),
            test: "it()".to_string(),
            ..ComponentTemplate::default()
        };
        let options = GenerationOptions {
            include_test: true,
            ..GenerationOptions::DEFAULT
        };
        let component = assemble_component(generation, template, &options);

        let paths: Vec<&str> = component.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["components/ui/card.tsx", "__tests__/card.test.tsx"]);
    }

    #[test]
    fn missing_key_is_rejected_up_front() {
        assert!(matches!(
            GenerationEngine::new(EngineConfig::default()),
            Err(GenerateError::MissingApiKey)
        ));
    }
}
