use raynaui_core::{IssueSeverity, validate_registry_item_json, validate_registry_json};
use serde_json::json;

fn custom_registry() -> serde_json::Value {
    json!({
        "name": "raynaui",
        "homepage": "https://raynaui.com",
        "items": [
            {
                "name": "animated-button",
                "type": "registry:ui",
                "registryDependencies": ["button"],
                "files": [{"path": "components/ui/animated-button.tsx", "type": "registry:ui"}],
                "dependencies": ["framer-motion"],
                "description": "An animated button component with hover effects"
            },
            {
                "name": "gradient-card",
                "type": "registry:ui",
                "registryDependencies": ["animated-button"],
                "files": [{"path": "components/ui/gradient-card.tsx", "type": "registry:ui"}]
            }
        ]
    })
}

#[test]
fn valid_registry_reports_only_upstream_dependencies() {
    let report = validate_registry_json(&custom_registry()).expect("validate registry");
    assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, "external_registry_dependency");
    assert_eq!(report.warnings[0].path, "/items/0/registryDependencies/0");
}

#[test]
fn missing_required_field_is_a_schema_violation() {
    let mut registry = custom_registry();
    registry
        .as_object_mut()
        .expect("registry object")
        .remove("homepage");

    let report = validate_registry_json(&registry).expect("validate registry");
    assert!(!report.is_ok());
    assert!(report.errors.iter().all(|issue| issue.code == "schema_violation"));
}

#[test]
fn duplicate_names_and_unknown_types_are_errors() {
    let mut registry = custom_registry();
    registry["items"][1]["name"] = json!("animated-button");
    registry["items"][1]["type"] = json!("registry:widget");

    let report = validate_registry_json(&registry).expect("validate registry");
    let codes: Vec<&str> = report.errors.iter().map(|issue| issue.code.as_str()).collect();
    assert!(codes.contains(&"duplicate_item_name"));
    assert!(codes.contains(&"unknown_item_type"));
    assert!(report.errors.iter().all(|issue| issue.severity == IssueSeverity::Error));
}

#[test]
fn legacy_component_tag_is_a_warning() {
    let item = json!({
        "name": "floating-nav",
        "type": "components:ui",
        "registryDependencies": ["navigation-menu"],
        "files": [{"path": "components/ui/floating-nav.tsx", "type": "registry:component"}]
    });

    let report = validate_registry_item_json(&item).expect("validate item");
    assert!(report.is_ok());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, "legacy_item_type");
    assert_eq!(report.warnings[0].path, "/type");
}

#[test]
fn empty_file_path_is_an_error() {
    let item = json!({
        "name": "broken",
        "type": "registry:lib",
        "files": [{"path": "", "type": "registry:lib"}]
    });

    let report = validate_registry_item_json(&item).expect("validate item");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path, "/files/0/path");
}
