use std::path::{Path, PathBuf};

use raynaui_core::{GenerationOptions, Style};
use raynaui_generate::EngineConfig;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "raynaui.toml";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Contents of `raynaui.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub generator: GeneratorSection,
    pub defaults: DefaultsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsSection {
    pub style: Option<String>,
    pub example: Option<bool>,
    pub docs: Option<bool>,
    pub test: Option<bool>,
    pub overwrite: Option<bool>,
}

/// Generation switches as given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationFlags {
    pub style: Option<Style>,
    pub no_example: bool,
    pub no_docs: bool,
    pub test: bool,
    pub overwrite: bool,
}

/// Load the explicit config path, or `raynaui.toml` in `cwd` when present.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> CliResult<FileConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(FileConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|err| {
        CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
    })?;
    let config = parse_config(&content)?;
    tracing::debug!(event = "config_loaded", path = %path.display());
    Ok(config)
}

pub fn parse_config(content: &str) -> CliResult<FileConfig> {
    let config: FileConfig = toml::from_str(content)?;
    if let Some(temperature) = config.generator.temperature {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(CliError::InvalidConfig(format!(
                "temperature must be between 0 and 1, got {temperature}"
            )));
        }
    }
    if config.generator.max_tokens == Some(0) {
        return Err(CliError::InvalidConfig(
            "max_tokens must be greater than zero".to_string(),
        ));
    }
    Ok(config)
}

impl FileConfig {
    /// Engine settings: flag, then file, then built-in default.
    pub fn engine_config(&self, model_flag: Option<String>, api_key: Option<String>) -> EngineConfig {
        let defaults = EngineConfig::default();
        let generator = &self.generator;
        EngineConfig {
            api_key,
            model: model_flag
                .or_else(|| generator.model.clone())
                .unwrap_or(defaults.model),
            temperature: generator.temperature.unwrap_or(defaults.temperature),
            max_tokens: generator.max_tokens.unwrap_or(defaults.max_tokens),
            base_url: generator.base_url.clone().unwrap_or(defaults.base_url),
        }
    }

    /// Generation options starting from [`GenerationOptions::DEFAULT`].
    ///
    /// Negative flags (`--no-example`, `--no-docs`) and positive flags
    /// (`--test`, `--overwrite`) win over the file; the file wins over the
    /// built-in default.
    pub fn generation_options(&self, flags: &GenerationFlags) -> CliResult<GenerationOptions> {
        let base = GenerationOptions::DEFAULT;
        let defaults = &self.defaults;

        let style = match (flags.style, defaults.style.as_deref()) {
            (Some(style), _) => style,
            (None, Some(name)) => name.parse()?,
            (None, None) => base.style,
        };

        Ok(GenerationOptions {
            style,
            include_example: !flags.no_example
                && defaults.example.unwrap_or(base.include_example),
            include_documentation: !flags.no_docs
                && defaults.docs.unwrap_or(base.include_documentation),
            include_test: flags.test || defaults.test.unwrap_or(base.include_test),
            overwrite: flags.overwrite || defaults.overwrite.unwrap_or(base.overwrite),
            ..base
        })
    }
}

/// API key from the flag, then the environment. Blank values count as absent.
pub fn resolve_api_key(flag: Option<String>, env_value: Option<String>) -> Option<String> {
    flag.into_iter()
        .chain(env_value)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
