//! Validation pattern synthesis.
//!
//! Derives, element by element, a regular expression that matches exactly
//! the shapes the renderer can produce, so manually entered identifiers
//! can be checked against the same format that generates them.
//!
//! One asymmetry is inherited deliberately: a `Random` element with no
//! spec renders as the empty string, but its fallback sub-pattern is
//! `\d+`. Resolving it either way would invalidate identifiers already in
//! storage, so it stays.

use regex::{Regex, RegexBuilder};
use skumint_core::{IdElement, IdFormat, TemplateError, MAX_TOKEN_WIDTH};

const GUID_PATTERN: &str =
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// Builds the anchored pattern source for a format.
pub fn build_pattern(format: &IdFormat) -> Result<String, TemplateError> {
    let mut pattern = String::from("^");
    for element in format.elements() {
        match element {
            IdElement::FixedText { value } => {
                if let Some(value) = value {
                    if !value.is_empty() {
                        pattern.push_str(&regex::escape(value));
                    }
                }
            }
            IdElement::Random { format: spec } | IdElement::Sequence { format: spec } => {
                match spec.as_deref() {
                    None | Some("") => pattern.push_str("\\d+"),
                    Some(spec) => {
                        if let Some(rest) = spec.strip_prefix('D') {
                            let width = checked_width(rest)?;
                            pattern.push_str(&format!("\\d{{{width}}}"));
                        } else if let Some(rest) = spec.strip_prefix('X') {
                            let width = checked_width(rest)?;
                            pattern.push_str(&format!("[0-9a-fA-F]{{{width}}}"));
                        }
                        // Other prefixes shape nothing, same as the renderer.
                    }
                }
            }
            // The pattern does not validate date content, only presence.
            IdElement::DateTime { .. } => pattern.push_str(".+"),
            IdElement::Guid => pattern.push_str(GUID_PATTERN),
            IdElement::Unknown => {
                return Err(TemplateError::Corrupt(
                    "unknown element kind in stored format".to_string(),
                ))
            }
        }
    }
    pattern.push('$');
    Ok(pattern)
}

/// Compiles the pattern for case-insensitive matching.
pub fn compile_pattern(format: &IdFormat) -> Result<Regex, TemplateError> {
    let source = build_pattern(format)?;
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| TemplateError::Corrupt(e.to_string()))
}

/// Parses a repetition width, rejecting anything that does not read as a
/// small non-negative integer.
fn checked_width(text: &str) -> Result<usize, TemplateError> {
    let width: usize = text
        .parse()
        .map_err(|_| TemplateError::Corrupt(format!("token width '{text}' is not a number")))?;
    if width > MAX_TOKEN_WIDTH {
        return Err(TemplateError::Corrupt(format!(
            "token width {width} exceeds the maximum of {MAX_TOKEN_WIDTH}"
        )));
    }
    Ok(width)
}
