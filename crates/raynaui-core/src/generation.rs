use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::DEFAULT_REGISTRY_DEPENDENCY;

/// Structured description of a component, extracted from a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGeneration {
    /// Component identifier, used verbatim as the exported name.
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Props in declaration order; the order is kept in generated code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub props: Vec<PropSpec>,
    /// Variant axes in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<VariantSpec>,
    /// Free-form usage snippets appended to the documentation page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<String>,
    /// npm packages the component imports.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
    /// Other registry entries the component builds on.
    #[serde(
        default = "default_registry_dependencies",
        deserialize_with = "registry_dependencies_or_default"
    )]
    pub registry_dependencies: Vec<String>,
}

/// One prop of the generated component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSpec {
    pub name: String,
    /// TypeScript type expression, emitted as-is.
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// TypeScript expression used as the default when the prop is omitted.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub default_value: Option<String>,
}

/// A named axis of visual alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSpec {
    pub name: String,
    pub values: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub default_value: Option<String>,
}

impl VariantSpec {
    /// First declared value; used by example and test artifacts.
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Value used in `defaultVariants`: the declared default or the first value.
    pub fn effective_default(&self) -> Option<&str> {
        self.default_value.as_deref().or_else(|| self.first_value())
    }
}

impl PropSpec {
    /// Doc text for the prop, falling back to its name.
    pub fn doc(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.name,
        }
    }
}

impl ComponentGeneration {
    /// Minimal record with the given name and description and contract defaults.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            props: Vec::new(),
            variants: Vec::new(),
            examples: Vec::new(),
            dependencies: Vec::new(),
            registry_dependencies: default_registry_dependencies(),
        }
    }

    /// Lowercased name used for file paths and import specifiers.
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }

    /// Drop repeated entries from the dependency sets, keeping first occurrence,
    /// and treat blank default values as absent.
    pub fn normalized(mut self) -> Self {
        for prop in &mut self.props {
            clear_blank(&mut prop.default_value);
        }
        for variant in &mut self.variants {
            clear_blank(&mut variant.default_value);
        }
        dedup_in_order(&mut self.dependencies);
        dedup_in_order(&mut self.registry_dependencies);
        self
    }
}

fn clear_blank(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
        *value = None;
    }
}

fn dedup_in_order(values: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    values.retain(|value| seen.insert(value.clone()));
}

fn default_registry_dependencies() -> Vec<String> {
    vec![DEFAULT_REGISTRY_DEPENDENCY.to_string()]
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn registry_dependencies_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?
        .unwrap_or_else(default_registry_dependencies))
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "defaultValue must be a string, number or boolean, got {other}"
        ))),
    }
}
