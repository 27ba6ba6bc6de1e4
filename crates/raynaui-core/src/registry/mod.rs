//! Registry metadata records consumed by the documentation site.

mod model;
mod schema;
mod validate;

pub use model::{Registry, RegistryItem, RegistryItemFile, RegistryItemType};
pub use schema::{registry_item_json_schema, registry_json_schema};
pub use validate::{validate_registry, validate_registry_item_json, validate_registry_json};
