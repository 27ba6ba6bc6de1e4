use std::collections::{BTreeMap, BTreeSet};

use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use serde_json::Value;

use super::model::{Registry, RegistryItem, RegistryItemType};
use super::schema::{registry_item_json_schema, registry_json_schema};
use crate::error::{Error, Result};
use crate::report::{ValidationIssue, ValidationReport};

/// Validate a registry document: JSON Schema first, then cross-item rules.
pub fn validate_registry_json(document: &Value) -> Result<ValidationReport> {
    let structural = validate_structure(document, registry_json_schema())?;
    if !structural.is_ok() {
        return Ok(structural);
    }

    let registry: Registry = serde_json::from_value(document.clone())?;
    Ok(validate_registry(&registry))
}

/// Validate a single registry item document.
pub fn validate_registry_item_json(document: &Value) -> Result<ValidationReport> {
    let structural = validate_structure(document, registry_item_json_schema())?;
    if !structural.is_ok() {
        return Ok(structural);
    }

    let item: RegistryItem = serde_json::from_value(document.clone())?;
    let mut report = ValidationReport::default();
    validate_item(&item, "", &mut report);
    Ok(report)
}

/// Cross-item checks over a parsed registry.
pub fn validate_registry(registry: &Registry) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();

    for (idx, item) in registry.items.iter().enumerate() {
        let base_path = format!("/items/{idx}");
        validate_item(item, &base_path, &mut report);

        if let Some(previous) = first_seen.insert(item.name.as_str(), idx) {
            report.push(
                ValidationIssue::error(
                    "duplicate_item_name",
                    format!("{base_path}/name"),
                    format!(
                        "item name '{}' is already used by /items/{previous}",
                        item.name
                    ),
                )
                .with_hint("rename one of the items"),
            );
            first_seen.insert(item.name.as_str(), previous);
        }
    }

    let defined: BTreeSet<&str> = registry.items.iter().map(|item| item.name.as_str()).collect();
    for (idx, item) in registry.items.iter().enumerate() {
        let Some(dependencies) = &item.registry_dependencies else {
            continue;
        };
        for (dep_idx, dependency) in dependencies.iter().enumerate() {
            if !defined.contains(dependency.as_str()) {
                report.push(ValidationIssue::warning(
                    "external_registry_dependency",
                    format!("/items/{idx}/registryDependencies/{dep_idx}"),
                    format!(
                        "'{dependency}' is not defined in this registry and must come from upstream"
                    ),
                ));
            }
        }
    }

    report
}

fn validate_item(item: &RegistryItem, base_path: &str, report: &mut ValidationReport) {
    if item.name.trim().is_empty() {
        report.push(ValidationIssue::error(
            "item_name_empty",
            format!("{base_path}/name"),
            "registry item name must not be empty",
        ));
    }

    if item.item_type == RegistryItemType::LEGACY_UI_TAG {
        report.push(
            ValidationIssue::warning(
                "legacy_item_type",
                format!("{base_path}/type"),
                format!("'{}' is a legacy type tag", item.item_type),
            )
            .with_hint("use registry:ui"),
        );
    } else if item.kind().is_none() {
        report.push(
            ValidationIssue::error(
                "unknown_item_type",
                format!("{base_path}/type"),
                format!("unknown registry item type '{}'", item.item_type),
            )
            .with_hint(known_types_hint()),
        );
    }

    if let Some(files) = &item.files {
        for (idx, file) in files.iter().enumerate() {
            if file.path.trim().is_empty() {
                report.push(ValidationIssue::error(
                    "file_path_empty",
                    format!("{base_path}/files/{idx}/path"),
                    "registry file path must not be empty",
                ));
            }
        }
    }
}

fn validate_structure(document: &Value, schema: RootSchema) -> Result<ValidationReport> {
    let schema_json = serde_json::to_value(&schema)?;
    let compiled =
        JSONSchema::compile(&schema_json).map_err(|err| Error::RegistrySchema(err.to_string()))?;

    let mut report = ValidationReport::default();
    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    Ok(report)
}

fn known_types_hint() -> String {
    let names: Vec<&str> = RegistryItemType::ALL.iter().map(|kind| kind.as_str()).collect();
    format!("expected one of: {}", names.join(", "))
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
