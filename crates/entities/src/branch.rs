//! Branch: a physical site of the business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: EntityId,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub address: Option<String>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Branch, "branch");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(100)])
        .field_labeled("mobile", "Mobile number", vec![Rule::Required, Rule::Digits(10)])
        .field("address", vec![Rule::Required, Rule::MaxLen(250)])
}
