use raynaui_core::{ComponentGeneration, validate_generation};

use crate::errors::ParseError;

/// Greedy span from the first `{` to the last `}` of `raw`.
///
/// Model replies may wrap the JSON object in prose or code fences; taking
/// the outermost braces tolerates both.
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse a model reply into a validated generation record.
pub fn parse_response(raw: &str) -> Result<ComponentGeneration, ParseError> {
    let span = extract_json_span(raw).ok_or(ParseError::NoJsonObject)?;
    let generation: ComponentGeneration = serde_json::from_str(span)?;
    let generation = generation.normalized();
    validate_generation(&generation)?;
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_wrapped_in_prose() {
        let raw = "Here is the result: {\"name\":\"X\",\"description\":\"d\"} thanks";
        let generation = parse_response(raw).expect("parse reply");

        assert_eq!(generation.name, "X");
        assert_eq!(generation.description, "d");
        assert!(generation.props.is_empty());
        assert!(generation.variants.is_empty());
        assert!(generation.dependencies.is_empty());
        assert_eq!(generation.registry_dependencies, vec!["utils".to_string()]);
    }

    #[test]
    fn parses_object_inside_code_fence() {
        let raw = "```json\n{\n  \"name\": \"Badge\",\n  \"description\": \"a badge\",\n  \"variants\": [{\"name\": \"tone\", \"values\": [\"info\", \"warn\"]}]\n}\n```";
        let generation = parse_response(raw).expect("parse reply");
        assert_eq!(generation.variants.len(), 1);
        assert_eq!(generation.variants[0].values, vec!["info", "warn"]);
    }

    #[test]
    fn missing_braces_is_reported() {
        assert!(matches!(
            parse_response("I cannot help with that."),
            Err(ParseError::NoJsonObject)
        ));
        assert!(matches!(
            parse_response("} backwards {"),
            Err(ParseError::NoJsonObject)
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            parse_response("{\"name\": \"X\",}"),
            Err(ParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn greedy_span_swallows_trailing_objects() {
        let raw = "{\"name\":\"A\"} and also {\"name\":\"B\"}";
        assert_eq!(extract_json_span(raw), Some(raw));
        assert!(matches!(
            parse_response(raw),
            Err(ParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn blank_variant_default_falls_back_to_first_value() {
        let raw = r#"{"name":"Chip","variants":[{"name":"size","values":["sm","lg"],"defaultValue":""}]}"#;
        let generation = parse_response(raw).expect("parse reply");
        assert!(generation.variants[0].default_value.is_none());
        assert_eq!(generation.variants[0].effective_default(), Some("sm"));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let raw = "{\"name\":\"my button\",\"description\":\"d\"}";
        assert!(matches!(
            parse_response(raw),
            Err(ParseError::InvalidRecord(_))
        ));
    }
}
