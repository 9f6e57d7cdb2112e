//! Production department, orderable via its sequence number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub sequence: Option<i64>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Department, "department", sequence);

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(100)])
        .field("sequence", vec![Rule::Range { min: 0.0, max: 9999.0 }])
}
