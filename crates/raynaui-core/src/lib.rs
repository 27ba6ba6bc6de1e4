//! Core contracts for the RaynaUI component generator.
//!
//! This crate defines the generation options, the generation record parsed
//! from model replies, the rendered template and bundle types, and the
//! registry metadata records shared by the generator, the materializer and
//! the CLI.

pub mod bundle;
pub mod error;
pub mod generation;
pub mod options;
pub mod registry;
pub mod report;
pub mod template;
pub mod validation;

pub use bundle::{FileKind, GenerationResult, RegistryComponent, VirtualFile};
pub use error::{Error, Result};
pub use generation::{ComponentGeneration, PropSpec, VariantSpec};
pub use options::{GenerationOptions, Style, WriteOptions};
pub use registry::{
    Registry, RegistryItem, RegistryItemFile, RegistryItemType, registry_item_json_schema,
    registry_json_schema, validate_registry, validate_registry_item_json, validate_registry_json,
};
pub use report::{IssueSeverity, ValidationIssue, ValidationReport};
pub use template::ComponentTemplate;
pub use validation::{RESERVED_NAMES, is_identifier, validate_generation};

/// Registry dependency assumed when a generation record declares none.
pub const DEFAULT_REGISTRY_DEPENDENCY: &str = "utils";
