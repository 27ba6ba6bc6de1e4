//! Context-specific escaping for text interpolated into generated artifacts.
//!
//! Identifiers are validated before rendering and are emitted as-is; every
//! free-text field goes through one of these helpers.

/// Body of a double-quoted JavaScript string literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out
}

/// Body of a double-quoted JSX attribute string (entities, no backslashes).
pub fn jsx_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' | '\r' => out.push(' '),
            ch => out.push(ch),
        }
    }
    out
}

/// Text inside a `/** ... */` comment, kept on one line.
pub fn doc_comment(value: &str) -> String {
    value
        .replace("*/", "*\\/")
        .replace(['\n', '\r'], " ")
}

/// Inline MDX text: braces and angle brackets would otherwise start
/// expressions or JSX.
pub fn mdx_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' | '\r' => out.push(' '),
            ch => out.push(ch),
        }
    }
    out
}

/// MDX text placed in a Markdown table cell.
pub fn table_cell(value: &str) -> String {
    mdx_text(value).replace('|', "\\|")
}

/// Inline code span, fenced with enough backticks to hold `value`.
pub fn code_span(value: &str) -> String {
    let value = value.replace(['\n', '\r'], " ");
    let fence = "`".repeat(longest_backtick_run(&value) + 1);
    if value.starts_with('`') || value.ends_with('`') {
        format!("{fence} {value} {fence}")
    } else {
        format!("{fence}{value}{fence}")
    }
}

/// Inline code span placed in a Markdown table cell.
pub fn table_code_cell(value: &str) -> String {
    code_span(value).replace('|', "\\|")
}

/// Fenced code block that cannot be closed early by its own content.
pub fn code_block(language: &str, body: &str) -> String {
    let fence = "`".repeat((longest_backtick_run(body) + 1).max(3));
    format!("{fence}{language}\n{}\n{fence}", body.trim_end())
}

/// Double-quoted YAML scalar for front matter.
pub fn yaml_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn longest_backtick_run(value: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in value.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
