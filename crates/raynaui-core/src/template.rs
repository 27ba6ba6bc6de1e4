use serde::{Deserialize, Serialize};

/// Text artifacts rendered for one generation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Component source (`components/ui/<name>.tsx`).
    pub component: String,
    /// Usage example page.
    pub example: String,
    /// Test stub.
    pub test: String,
    /// MDX documentation page.
    pub documentation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
}
