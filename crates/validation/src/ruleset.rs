//! Ordered per-field rulesets.

use crate::rule::Rule;
use crate::{FieldErrors, FieldValues};

/// Rules for one field, with the label used in messages.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: String,
    pub label: String,
    pub rules: Vec<Rule>,
}

/// Per-entity validation schema.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; the message label is derived from the field name
    /// (`work_shift` → `Work shift`).
    pub fn field(self, name: &str, rules: Vec<Rule>) -> Self {
        let label = derive_label(name);
        self.field_labeled(name, &label, rules)
    }

    pub fn field_labeled(mut self, name: &str, label: &str, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldRules {
            field: name.to_string(),
            label: label.to_string(),
            rules,
        });
        self
    }

    /// Validate all fields; first failing rule per field wins.
    pub fn validate(&self, values: &FieldValues) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for fr in &self.fields {
            if let Some(msg) = self.check_field(fr, values) {
                errors.insert(fr.field.clone(), msg);
            }
        }
        errors
    }

    /// Validate a single field (per-keystroke checks).
    pub fn validate_field(&self, name: &str, values: &FieldValues) -> Option<String> {
        self.fields
            .iter()
            .find(|fr| fr.field == name)
            .and_then(|fr| self.check_field(fr, values))
    }

    pub fn is_valid(&self, values: &FieldValues) -> bool {
        self.validate(values).is_empty()
    }

    fn check_field(&self, fr: &FieldRules, values: &FieldValues) -> Option<String> {
        let value = values.get(&fr.field);
        fr.rules
            .iter()
            .find_map(|rule| rule.check(&fr.label, value, values))
    }
}

fn derive_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn branch_rules() -> RuleSet {
        RuleSet::new()
            .field("name", vec![Rule::Required, Rule::MaxLen(100)])
            .field_labeled("mobile", "Mobile number", vec![Rule::Required, Rule::Digits(10)])
            .field("address", vec![Rule::Required])
    }

    #[test]
    fn first_failing_rule_wins_per_field() {
        let values = FieldValues::from([
            ("name".to_string(), json!("")),
            ("mobile".to_string(), json!("123")),
            ("address".to_string(), json!("Main St")),
        ]);
        let errors = branch_rules().validate(&values);
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["mobile"], "Enter valid 10-digit mobile number");
        assert!(!errors.contains_key("address"));
    }

    #[test]
    fn valid_draft_produces_no_errors() {
        let values = FieldValues::from([
            ("name".to_string(), json!("HQ")),
            ("mobile".to_string(), json!("9876543210")),
            ("address".to_string(), json!("Main St")),
        ]);
        assert!(branch_rules().is_valid(&values));
    }

    #[test]
    fn validate_field_checks_only_that_field() {
        let values = FieldValues::from([("mobile".to_string(), json!("123"))]);
        let rules = branch_rules();
        assert_eq!(
            rules.validate_field("mobile", &values),
            Some("Enter valid 10-digit mobile number".to_string())
        );
        // Unknown fields have no rules.
        assert_eq!(rules.validate_field("nope", &values), None);
    }

    #[test]
    fn labels_derive_from_snake_case() {
        let rules = RuleSet::new().field("work_shift", vec![Rule::Required]);
        let errors = rules.validate(&FieldValues::new());
        assert_eq!(errors["work_shift"], "Work shift is required");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: exactly-10-digit strings always pass the mobile rule,
            /// everything else with a different length always fails.
            #[test]
            fn digits_rule_is_length_exact(s in "[0-9]{1,20}") {
                let rule = Rule::Digits(10);
                let values = FieldValues::new();
                let result = rule.check("Mobile number", Some(&json!(s.clone())), &values);
                if s.len() == 10 {
                    prop_assert!(result.is_none());
                } else {
                    prop_assert!(result.is_some());
                }
            }

            /// Property: validate() never reports a field that has no rules.
            #[test]
            fn only_ruled_fields_are_reported(extra in "[a-z]{1,12}") {
                let rules = RuleSet::new().field("name", vec![Rule::Required]);
                let values = FieldValues::from([(extra.clone(), json!("x"))]);
                let errors = rules.validate(&values);
                prop_assert!(errors.keys().all(|k| k == "name"));
            }
        }
    }
}
