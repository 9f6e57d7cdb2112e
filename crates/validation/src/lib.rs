//! `milladmin-validation` — declarative field rulesets for form drafts.
//!
//! A [`RuleSet`] is the per-entity validation schema: an ordered list of
//! fields, each with its rules. Validation runs over a [`FieldValues`] map
//! (the form draft) and yields the first failing message per field.

pub mod rule;
pub mod ruleset;

use std::collections::BTreeMap;

pub use rule::Rule;
pub use ruleset::{FieldRules, RuleSet};

/// Form draft values, field name → JSON value.
pub type FieldValues = BTreeMap<String, serde_json::Value>;

/// Field name → first failing message.
pub type FieldErrors = BTreeMap<String, String>;
