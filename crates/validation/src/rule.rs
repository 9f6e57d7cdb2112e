//! Individual validation rules.

use regex::Regex;
use serde_json::Value;

use crate::FieldValues;

/// One declarative rule applied to a field value.
///
/// Rules other than `Required`/`RequiredIf` pass on an empty value; pair
/// them with `Required` when the field must be present.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present and non-empty.
    Required,

    /// Minimum string length.
    MinLen(usize),

    /// Maximum string length.
    MaxLen(usize),

    /// Exactly `n` ASCII digits (mobile numbers, PIN codes).
    Digits(usize),

    /// Numeric value within an inclusive range.
    Range { min: f64, max: f64 },

    /// Regex match with a custom message.
    Pattern { pattern: Regex, message: String },

    /// Required only when a sibling field holds one of the given values.
    RequiredIf { field: String, any_of: Vec<Value> },

    /// Must differ from a sibling field.
    NotEqual { field: String, message: String },

    /// Numeric value must not exceed a sibling field's value; `{max}` in the
    /// message is replaced with that sibling value.
    AtMostField { field: String, message: String },
}

impl Rule {
    /// Check the rule against `value`; `values` gives access to siblings for
    /// cross-field rules. Returns the failure message, if any.
    pub fn check(&self, label: &str, value: Option<&Value>, values: &FieldValues) -> Option<String> {
        match self {
            Rule::Required => {
                if is_empty(value) {
                    Some(format!("{label} is required"))
                } else {
                    None
                }
            }
            Rule::MinLen(min) => {
                let text = non_empty_text(value)?;
                if text.chars().count() < *min {
                    Some(format!("{label} must be at least {min} characters"))
                } else {
                    None
                }
            }
            Rule::MaxLen(max) => {
                let text = non_empty_text(value)?;
                if text.chars().count() > *max {
                    Some(format!("{label} must be at most {max} characters"))
                } else {
                    None
                }
            }
            Rule::Digits(n) => {
                let text = non_empty_text(value)?;
                if text.len() == *n && text.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    Some(format!("Enter valid {n}-digit {}", label.to_lowercase()))
                }
            }
            Rule::Range { min, max } => {
                if is_empty(value) {
                    return None;
                }
                match as_number(value) {
                    Some(n) if n >= *min && n <= *max => None,
                    _ => Some(format!("{label} must be between {min} and {max}")),
                }
            }
            Rule::Pattern { pattern, message } => {
                let text = non_empty_text(value)?;
                if pattern.is_match(text) {
                    None
                } else {
                    Some(message.clone())
                }
            }
            Rule::RequiredIf { field, any_of } => {
                let sibling = values.get(field);
                let triggered = sibling.is_some_and(|v| any_of.contains(v));
                if triggered && is_empty(value) {
                    Some(format!("{label} is required"))
                } else {
                    None
                }
            }
            Rule::NotEqual { field, message } => {
                if is_empty(value) {
                    return None;
                }
                if values.get(field) == value {
                    Some(message.clone())
                } else {
                    None
                }
            }
            Rule::AtMostField { field, message } => {
                if is_empty(value) {
                    return None;
                }
                let limit = as_number(values.get(field))?;
                match as_number(value) {
                    Some(n) if n <= limit => None,
                    Some(_) => Some(message.replace("{max}", &trim_number(limit))),
                    None => None,
                }
            }
        }
    }
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// String content of a present value; `None` short-circuits the rule.
fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn trim_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
