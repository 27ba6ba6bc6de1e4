use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Kinds of entries a registry can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RegistryItemType {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:theme")]
    Theme,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:example")]
    Example,
    #[serde(rename = "registry:internal")]
    Internal,
    #[serde(rename = "registry:style")]
    Style,
}

impl RegistryItemType {
    /// Tag written by older registries for UI components.
    pub const LEGACY_UI_TAG: &'static str = "components:ui";

    pub const ALL: [RegistryItemType; 8] = [
        RegistryItemType::Ui,
        RegistryItemType::Lib,
        RegistryItemType::Hook,
        RegistryItemType::Theme,
        RegistryItemType::Block,
        RegistryItemType::Example,
        RegistryItemType::Internal,
        RegistryItemType::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryItemType::Ui => "registry:ui",
            RegistryItemType::Lib => "registry:lib",
            RegistryItemType::Hook => "registry:hook",
            RegistryItemType::Theme => "registry:theme",
            RegistryItemType::Block => "registry:block",
            RegistryItemType::Example => "registry:example",
            RegistryItemType::Internal => "registry:internal",
            RegistryItemType::Style => "registry:style",
        }
    }
}

impl fmt::Display for RegistryItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryItemType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == Self::LEGACY_UI_TAG {
            return Ok(RegistryItemType::Ui);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| Error::InvalidOption(format!("unknown registry item type '{value}'")))
    }
}

/// A file shipped by a registry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegistryItemFile {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Install location in the consuming project, when it differs from `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Metadata record for one registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,
    /// Registry kind tag, see [`RegistryItemType`].
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<RegistryItemFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, Value>>,
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<BTreeMap<String, Value>>,
}

impl RegistryItem {
    /// Parsed kind tag, `None` when the tag is not a known registry kind.
    pub fn kind(&self) -> Option<RegistryItemType> {
        self.item_type.parse().ok()
    }
}

/// A named collection of registry items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Registry {
    pub name: String,
    pub homepage: String,
    pub items: Vec<RegistryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_legacy_tags() {
        assert_eq!(
            "registry:hook".parse::<RegistryItemType>().expect("hook"),
            RegistryItemType::Hook
        );
        assert_eq!(
            "components:ui".parse::<RegistryItemType>().expect("legacy"),
            RegistryItemType::Ui
        );
        assert!("registry:widget".parse::<RegistryItemType>().is_err());
    }

    #[test]
    fn item_round_trips_camel_case_keys() {
        let json = serde_json::json!({
            "name": "animated-button",
            "type": "registry:ui",
            "registryDependencies": ["button"],
            "devDependencies": ["@types/react"],
            "cssVars": {"light": {"primary": "0 0% 0%"}},
            "$schema": "https://example.com/registry-item.json"
        });
        let item: RegistryItem = serde_json::from_value(json.clone()).expect("parse item");
        assert_eq!(item.kind(), Some(RegistryItemType::Ui));
        assert_eq!(item.registry_dependencies.as_deref(), Some(&["button".to_string()][..]));
        assert_eq!(serde_json::to_value(&item).expect("serialize"), json);
    }
}
