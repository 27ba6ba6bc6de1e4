use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Visual style family a component is generated for.
///
/// The style is carried through the whole pipeline and echoed in the user
/// prompt, but no rendered artifact depends on it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    #[serde(rename = "new-york")]
    NewYork,
    #[serde(rename = "default")]
    Default,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::NewYork => "new-york",
            Style::Default => "default",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "new-york" => Ok(Style::NewYork),
            "default" => Ok(Style::Default),
            other => Err(Error::InvalidOption(format!(
                "unknown style '{other}' (expected new-york or default)"
            ))),
        }
    }
}

/// Options for one generation run.
///
/// Built once per invocation and passed by reference through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub style: Style,
    pub include_types: bool,
    pub include_styles: bool,
    pub include_example: bool,
    pub include_test: bool,
    pub include_documentation: bool,
    /// Directory the bundle is written under; the materializer base dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Replace files that already exist instead of reporting a conflict.
    pub overwrite: bool,
}

impl GenerationOptions {
    /// The single source of default option values.
    pub const DEFAULT: GenerationOptions = GenerationOptions {
        style: Style::NewYork,
        include_types: true,
        include_styles: true,
        include_example: true,
        include_test: false,
        include_documentation: true,
        output_dir: None,
        overwrite: false,
    };

    /// The subset of options the materializer cares about.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            output_dir: self.output_dir.clone(),
            overwrite: self.overwrite,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options for writing a bundle to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
}
