use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::generation::ComponentGeneration;

/// Bindings the rendered component already declares in its parameter list.
pub const RESERVED_NAMES: [&str; 3] = ["className", "ref", "props"];

/// Returns true when `value` is a JavaScript identifier (ASCII subset).
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}

/// Validate a generation record before it is rendered.
///
/// This checks:
/// - the component, prop and variant names are identifiers
/// - prop and variant names are unique, distinct from each other and
///   from the reserved component bindings
/// - every variant declares at least one value and its default is one of them
/// - prop types and default expressions fit on one line
pub fn validate_generation(generation: &ComponentGeneration) -> Result<()> {
    if generation.name.trim().is_empty() {
        return Err(Error::InvalidGeneration(
            "component name must not be empty".to_string(),
        ));
    }
    if !is_identifier(&generation.name) {
        return Err(Error::InvalidGeneration(format!(
            "component name '{}' is not a valid identifier",
            generation.name
        )));
    }

    let mut prop_names = BTreeSet::new();
    for prop in &generation.props {
        if !is_identifier(&prop.name) {
            return Err(Error::InvalidGeneration(format!(
                "prop name '{}' is not a valid identifier",
                prop.name
            )));
        }
        if RESERVED_NAMES.contains(&prop.name.as_str()) {
            return Err(Error::InvalidGeneration(format!(
                "prop name '{}' is reserved",
                prop.name
            )));
        }
        if !prop_names.insert(prop.name.as_str()) {
            return Err(Error::InvalidGeneration(format!(
                "duplicate prop name: {}",
                prop.name
            )));
        }
        if prop.prop_type.trim().is_empty() || is_multiline(&prop.prop_type) {
            return Err(Error::InvalidGeneration(format!(
                "prop '{}' must declare a single-line type",
                prop.name
            )));
        }
        if prop.default_value.as_deref().is_some_and(is_multiline) {
            return Err(Error::InvalidGeneration(format!(
                "default value of prop '{}' must be a single line",
                prop.name
            )));
        }
    }

    let mut variant_names = BTreeSet::new();
    for variant in &generation.variants {
        if !is_identifier(&variant.name) {
            return Err(Error::InvalidGeneration(format!(
                "variant name '{}' is not a valid identifier",
                variant.name
            )));
        }
        if RESERVED_NAMES.contains(&variant.name.as_str()) {
            return Err(Error::InvalidGeneration(format!(
                "variant name '{}' is reserved",
                variant.name
            )));
        }
        if prop_names.contains(variant.name.as_str()) {
            return Err(Error::InvalidGeneration(format!(
                "variant '{}' has the same name as a prop",
                variant.name
            )));
        }
        if !variant_names.insert(variant.name.as_str()) {
            return Err(Error::InvalidGeneration(format!(
                "duplicate variant name: {}",
                variant.name
            )));
        }
        if variant.values.is_empty() {
            return Err(Error::InvalidGeneration(format!(
                "variant '{}' must declare at least one value",
                variant.name
            )));
        }
        if let Some(default) = &variant.default_value {
            if !variant.values.iter().any(|value| value == default) {
                return Err(Error::InvalidGeneration(format!(
                    "default '{}' of variant '{}' is not one of its values",
                    default, variant.name
                )));
            }
        }
    }

    Ok(())
}

fn is_multiline(value: &str) -> bool {
    value.contains('\n') || value.contains('\r')
}
