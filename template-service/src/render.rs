//! Parameter validation and prompt rendering.
//!
//! Both operations are pure functions over a [`Template`] and a map of
//! supplied values. Callers are expected to validate first and render
//! second; [`render_prompt`] failing on a missing required parameter is a
//! caller bug, not a user-facing error path.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::{ParameterKind, Template};

/// Errors produced by [`render_prompt`].
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A required parameter had no value and no default.
    #[error("Required parameter '{0}' is missing")]
    MissingParameter(String),
}

/// Outcome of [`validate_parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValidation {
    /// True iff both problem lists are empty.
    pub is_valid: bool,
    /// Names of required parameters with no usable value.
    pub missing_required: Vec<String>,
    /// Messages of the form `"<name> must be a <type>"`.
    pub invalid_types: Vec<String>,
}

/// A value counts as absent when it is missing, null, or the empty string.
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numeric coercion check: JSON numbers and booleans coerce, strings coerce
/// when they parse as a float, everything else does not.
fn coerces_to_number(value: &Value) -> bool {
    match value {
        Value::Number(_) | Value::Bool(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Checks supplied `values` against a template's parameter specs.
///
/// A required parameter with an absent value is reported in
/// `missing_required`; a present value of the wrong shape is reported in
/// `invalid_types`. Boolean parameters accept any present value.
pub fn validate_parameters(template: &Template, values: &HashMap<String, Value>) -> ParameterValidation {
    let mut missing_required = Vec::new();
    let mut invalid_types = Vec::new();

    for param in &template.parameters {
        let value = values.get(&param.name);

        if param.required && is_absent(value) {
            missing_required.push(param.name.clone());
            continue;
        }

        let Some(value) = value else { continue };
        if is_absent(Some(value)) {
            continue;
        }

        match param.kind {
            ParameterKind::Number => {
                if !coerces_to_number(value) {
                    invalid_types.push(format!("{} must be a number", param.name));
                }
            }
            ParameterKind::String | ParameterKind::Text => {
                if !value.is_string() {
                    invalid_types.push(format!("{} must be a string", param.name));
                }
            }
            ParameterKind::Boolean => {}
        }
    }

    ParameterValidation {
        is_valid: missing_required.is_empty() && invalid_types.is_empty(),
        missing_required,
        invalid_types,
    }
}

/// Substitutes parameter values into a template's prompt.
///
/// For each parameter, every `{name}` occurrence is replaced with: the
/// supplied value when present and non-empty, else the parameter's default,
/// else nothing (optional parameters vanish). Runs of blank lines left
/// behind by vanished placeholders are collapsed to a single blank line and
/// the result is trimmed.
///
/// # Errors
/// Returns [`TemplateError::MissingParameter`] when a required parameter has
/// neither a value nor a default; run [`validate_parameters`] first.
pub fn render_prompt(template: &Template, values: &HashMap<String, Value>) -> Result<String, TemplateError> {
    let mut prompt = template.prompt.clone();

    for param in &template.parameters {
        let placeholder = format!("{{{}}}", param.name);

        let replacement = match values.get(&param.name) {
            Some(value) if !is_absent(Some(value)) => value_to_string(value),
            _ => match &param.default {
                Some(default) => value_to_string(default),
                None if param.required => {
                    return Err(TemplateError::MissingParameter(param.name.clone()));
                }
                None => String::new(),
            },
        };

        prompt = prompt.replace(&placeholder, &replacement);
    }

    Ok(collapse_blank_lines(&prompt).trim().to_string())
}

/// Shrinks runs of two or more blank lines to a single empty line. A lone
/// blank line is kept verbatim.
fn collapse_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            let start = i;
            while i < lines.len() && lines[i].trim().is_empty() {
                i += 1;
            }
            out.push(if i - start >= 2 { "" } else { lines[start] });
        } else {
            out.push(lines[i]);
            i += 1;
        }
    }

    out.join("\n")
}
