//! Renders a generation record into component, example, test and
//! documentation text.
//!
//! Every function here is pure: identical input yields identical text.
//! Names are validated identifiers and are interpolated directly; all other
//! strings are escaped for the context they land in.

use raynaui_core::{ComponentGeneration, ComponentTemplate, PropSpec, Style, VariantSpec};

use crate::escape::{
    code_block, code_span, doc_comment, js_string, jsx_attr, mdx_text, table_cell,
    table_code_cell, yaml_string,
};

/// Base classes shared by every generated component.
pub const BASE_CLASSES: &str = "inline-flex items-center justify-center rounded-md text-sm font-medium transition-colors focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-ring focus-visible:ring-offset-2 disabled:opacity-50 disabled:pointer-events-none ring-offset-background";

/// Render all artifacts for `generation`. `style` does not affect the output yet.
pub fn render_component_template(
    generation: &ComponentGeneration,
    _style: Style,
) -> ComponentTemplate {
    ComponentTemplate {
        component: render_component(generation),
        example: render_example(generation),
        test: render_test(generation),
        documentation: render_documentation(generation),
        types: None,
        styles: None,
    }
}

/// Marker class a variant value maps to in the generated `cva` table.
pub fn variant_class(value: &str) -> String {
    format!("{value}-classes")
}

fn import_path(generation: &ComponentGeneration) -> String {
    format!("@/components/ui/{}", generation.file_stem())
}

pub fn render_component(generation: &ComponentGeneration) -> String {
    let name = &generation.name;
    let mut out = String::new();

    out.push_str(&format!(
        r#""use client"

import * as React from "react"
import {{ cva, type VariantProps }} from "class-variance-authority"
import {{ cn }} from "@/lib/utils"

const {name}Variants = cva(
  "{BASE_CLASSES}",
  {{
"#
    ));
    if !generation.variants.is_empty() {
        out.push_str(&render_variants_block(&generation.variants));
    }
    out.push_str("  }\n)\n\n");

    out.push_str(&format!(
        "export interface {name}Props\n  extends React.HTMLAttributes<HTMLDivElement>,\n    VariantProps<typeof {name}Variants> {{\n"
    ));
    for prop in &generation.props {
        out.push_str(&render_prop_declaration(prop));
    }
    out.push_str("}\n\n");

    let mut params = vec!["className".to_string()];
    params.extend(generation.variants.iter().map(|variant| variant.name.clone()));
    params.extend(generation.props.iter().map(render_prop_binding));
    params.push("...props".to_string());

    let mut variant_args: Vec<&str> = generation
        .variants
        .iter()
        .map(|variant| variant.name.as_str())
        .collect();
    variant_args.push("className");

    out.push_str(&format!(
        "const {name} = React.forwardRef<HTMLDivElement, {name}Props>(\n  ({{ {params} }}, ref) => {{\n    return (\n      <div\n        ref={{ref}}\n        className={{cn({name}Variants({{ {args} }}))}}\n",
        params = params.join(", "),
        args = variant_args.join(", "),
    ));
    for prop in &generation.props {
        out.push_str(&format!("        {0}={{{0}}}\n", prop.name));
    }
    out.push_str(&format!(
        "        {{...props}}\n      />\n    )\n  }}\n)\n{name}.displayName = \"{name}\"\n\nexport {{ {name}, {name}Variants }}\n"
    ));

    out
}

fn render_variants_block(variants: &[VariantSpec]) -> String {
    let mut out = String::from("    variants: {\n");
    for variant in variants {
        out.push_str(&format!("      {}: {{\n", variant.name));
        for value in &variant.values {
            out.push_str(&format!(
                "        \"{}\": \"{}\",\n",
                js_string(value),
                js_string(&variant_class(value))
            ));
        }
        out.push_str("      },\n");
    }
    out.push_str("    },\n    defaultVariants: {\n");
    for variant in variants {
        if let Some(default) = variant.effective_default() {
            out.push_str(&format!(
                "      {}: \"{}\",\n",
                variant.name,
                js_string(default)
            ));
        }
    }
    out.push_str("    },\n");
    out
}

fn render_prop_declaration(prop: &PropSpec) -> String {
    let optional = if prop.required { "" } else { "?" };
    let doc = match &prop.default_value {
        Some(default) => format!(
            "{} @default {}",
            doc_comment(prop.doc()),
            doc_comment(default)
        ),
        None => doc_comment(prop.doc()),
    };
    format!(
        "  /** {doc} */\n  {}{optional}: {}\n",
        prop.name, prop.prop_type
    )
}

fn render_prop_binding(prop: &PropSpec) -> String {
    match &prop.default_value {
        Some(default) => format!("{} = {}", prop.name, default),
        None => prop.name.clone(),
    }
}

/// Example page: one default usage block, then one block per variant using
/// that variant's first value.
pub fn render_example(generation: &ComponentGeneration) -> String {
    let name = &generation.name;
    let mut out = format!(
        "import {{ {name} }} from \"{path}\"\n\nexport default function {name}Example() {{\n  return (\n    <div className=\"space-y-4\">\n      <{name}>\n        Default {name}\n      </{name}>\n",
        path = import_path(generation),
    );
    for variant in &generation.variants {
        let value = variant.first_value().unwrap_or_default();
        out.push_str(&format!(
            "      <{name} {variant_name}=\"{value}\">\n        {variant_name} variant\n      </{name}>\n",
            variant_name = variant.name,
            value = jsx_attr(value),
        ));
    }
    out.push_str("    </div>\n  )\n}\n");
    out
}

/// Test stub mirroring the example: a baseline render plus one class
/// assertion per variant.
pub fn render_test(generation: &ComponentGeneration) -> String {
    let name = &generation.name;
    let mut out = format!(
        "import {{ render, screen }} from \"@testing-library/react\"\nimport {{ {name} }} from \"{path}\"\n\ndescribe(\"{name}\", () => {{\n  it(\"renders correctly\", () => {{\n    render(<{name}>Test content</{name}>)\n    expect(screen.getByText(\"Test content\")).toBeInTheDocument()\n  }})\n",
        path = import_path(generation),
    );
    for variant in &generation.variants {
        let value = variant.first_value().unwrap_or_default();
        out.push_str(&format!(
            "\n  it(\"applies {variant_name} variant correctly\", () => {{\n    render(<{name} {variant_name}=\"{attr}\">Test</{name}>)\n    const element = screen.getByText(\"Test\")\n    expect(element).toHaveClass(\"{class}\")\n  }})\n",
            variant_name = variant.name,
            attr = jsx_attr(value),
            class = js_string(&variant_class(value)),
        ));
    }
    out.push_str("})\n");
    out
}

/// MDX documentation page. The props table and variants section are left
/// out when there is nothing to list.
pub fn render_documentation(generation: &ComponentGeneration) -> String {
    let name = &generation.name;
    let usage = format!(
        "import {{ {name} }} from \"{path}\"\n\nexport default function Example() {{\n  return (\n    <{name}>\n      {name} content\n    </{name}>\n  )\n}}",
        path = import_path(generation),
    );

    let mut out = format!(
        "---\ntitle: {name}\ndescription: {description}\n---\n\nThe {name} component provides {summary}.\n\n## Usage\n\n{usage}\n",
        description = yaml_string(&generation.description),
        summary = mdx_text(&generation.description),
        usage = code_block("tsx", &usage),
    );

    if !generation.props.is_empty() {
        out.push_str(
            "\n## Props\n\n| Prop | Type | Default | Description |\n|------|------|---------|-------------|\n",
        );
        for prop in &generation.props {
            let default = match &prop.default_value {
                Some(value) => table_code_cell(value),
                None => "-".to_string(),
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                prop.name,
                table_code_cell(&prop.prop_type),
                default,
                table_cell(prop.doc()),
            ));
        }
    }

    if !generation.variants.is_empty() {
        out.push_str("\n## Variants\n");
        for variant in &generation.variants {
            out.push_str(&format!("\n### {}\n\n", variant.name));
            for value in &variant.values {
                out.push_str(&format!(
                    "- {} - {} variant\n",
                    code_span(value),
                    mdx_text(value)
                ));
            }
        }
    }

    if !generation.examples.is_empty() {
        out.push_str("\n## Examples\n");
        for example in &generation.examples {
            out.push('\n');
            out.push_str(&code_block("tsx", example));
            out.push('\n');
        }
    }

    out
}
