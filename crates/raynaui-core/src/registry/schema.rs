use schemars::schema::RootSchema;
use schemars::schema_for;

use super::model::{Registry, RegistryItem};

/// Emit the JSON Schema for a registry document.
pub fn registry_json_schema() -> RootSchema {
    schema_for!(Registry)
}

/// Emit the JSON Schema for a single registry item.
pub fn registry_item_json_schema() -> RootSchema {
    schema_for!(RegistryItem)
}
