//! Value parsers for clap arguments.
//!
//! These reject bad values at parse time so the error points at the flag
//! rather than surfacing later from the merge.

use weld_core::is_valid_identifier;

/// Parse a JavaScript identifier, e.g. the exports variable name.
///
/// # Errors
///
/// Returns a message naming the rejected value.
pub fn parse_identifier(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Identifier cannot be empty".to_string());
    }
    if !is_valid_identifier(s) {
        return Err(format!(
            "'{s}' is not a valid JavaScript identifier (letters, digits, '_' or '$', not starting with a digit, not a reserved word)"
        ));
    }
    Ok(s.to_string())
}

/// Parse an assignable export target: an identifier or a dotted member path
/// such as `module.exports`.
pub fn parse_export_target(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Export target cannot be empty".to_string());
    }
    match s.split('.').find(|segment| !is_valid_identifier(segment)) {
        Some(segment) => Err(format!(
            "'{s}' is not an assignable target: segment '{segment}' is not an identifier"
        )),
        None => Ok(s.to_string()),
    }
}

/// Parse a file extension. A missing leading dot is added.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Err("Extension cannot be empty".to_string());
    }
    if trimmed.contains(['/', '\\']) {
        return Err(format!("'{s}' is not a file extension"));
    }
    if trimmed.starts_with('.') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!(".{trimmed}"))
    }
}
