use raynaui_core::{GenerationOptions, Style};

/// Instruction pair sent to the model for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

const SYSTEM_PROMPT: &str = r#"You are an expert React component generator for RaynaUI, a component library built on Radix-style primitives, Tailwind CSS and class-variance-authority. You know its design patterns, file structure and conventions.

Generate RaynaUI components from the user's description and follow these rules:

1. Component structure
   - start the file with the "use client" directive
   - forward refs with React.forwardRef
   - declare variants with class-variance-authority (cva)
   - props interfaces extend the matching React HTML attributes
   - set displayName on every component

2. Styling
   - Tailwind CSS utility classes only
   - consistent spacing, sizing and color tokens
   - responsive by default

3. Variants
   - visual variants: default, secondary, destructive, outline, ghost, link
   - size variants: default, sm, lg, xl
   - state variants such as disabled or loading when relevant

4. Props
   - children for content and className for custom styling
   - event handlers (onClick, onChange, ...) where they make sense
   - component-specific props with precise TypeScript types

5. Accessibility
   - correct ARIA attributes and roles
   - keyboard navigation and visible focus states
   - works with screen readers

6. Dependencies
   - class-variance-authority
   - lucide-react for icons
   - framer-motion only when animation is required

Reply with one JSON object describing the component in exactly this shape:
{
  "name": "ComponentName",
  "description": "Brief description of the component",
  "props": [
    {
      "name": "propName",
      "type": "string | number | boolean",
      "required": true,
      "description": "Prop description",
      "defaultValue": "default value if any"
    }
  ],
  "variants": [
    {
      "name": "variantName",
      "values": ["value1", "value2"],
      "defaultValue": "value1"
    }
  ],
  "dependencies": ["dependency1", "dependency2"],
  "registryDependencies": ["utils", "button"]
}"#;

/// Build the system and user prompts for a description.
///
/// The description is embedded verbatim; an empty description is passed
/// through unchanged.
pub fn build_prompts(description: &str, options: &GenerationOptions) -> Prompts {
    Prompts {
        system: build_system_prompt(options.style),
        user: build_user_prompt(description, options),
    }
}

/// The fixed instruction block. `style` is accepted but does not change the text.
pub fn build_system_prompt(_style: Style) -> String {
    SYSTEM_PROMPT.to_string()
}

pub fn build_user_prompt(description: &str, options: &GenerationOptions) -> String {
    format!(
        "Generate a RaynaUI component based on this description:

{description}

Provide the component specification in the JSON format described in the system prompt.

Additional requirements:
- Style: {style}
- Include example: {example}
- Include test: {test}
- Include documentation: {docs}

Respond only with the JSON specification, no additional text.",
        style = options.style,
        example = options.include_example,
        test = options.include_test,
        docs = options.include_documentation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_description_and_flags() {
        let options = GenerationOptions {
            include_test: true,
            include_documentation: false,
            ..GenerationOptions::DEFAULT
        };
        let prompts = build_prompts("A pill-shaped badge with {braces}", &options);

        assert!(prompts.user.contains("A pill-shaped badge with {braces}"));
        assert!(prompts.user.contains("- Style: new-york"));
        assert!(prompts.user.contains("- Include example: true"));
        assert!(prompts.user.contains("- Include test: true"));
        assert!(prompts.user.contains("- Include documentation: false"));
    }

    #[test]
    fn system_prompt_is_style_independent() {
        assert_eq!(
            build_system_prompt(Style::NewYork),
            build_system_prompt(Style::Default)
        );
        assert!(build_system_prompt(Style::NewYork).contains("\"registryDependencies\""));
    }

    #[test]
    fn empty_description_is_passed_through() {
        let prompts = build_prompts("", &GenerationOptions::DEFAULT);
        assert!(prompts.user.contains("description:\n\n\n"));
    }
}
