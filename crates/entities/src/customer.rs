//! Customer master record.
//!
//! The reference number is conditionally required: only when the payment
//! mode is one that produces an external reference (cheque/online).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Customer, "customer");

pub fn rules() -> RuleSet {
    let email = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex");
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(100)])
        .field_labeled("mobile", "Mobile number", vec![Rule::Required, Rule::Digits(10)])
        .field(
            "email",
            vec![Rule::Pattern {
                pattern: email,
                message: "Enter a valid email address".to_string(),
            }],
        )
        .field_labeled(
            "reference_number",
            "Reference number",
            vec![Rule::RequiredIf {
                field: "payment_mode".to_string(),
                any_of: vec![json!("cheque"), json!("online")],
            }],
        )
}
