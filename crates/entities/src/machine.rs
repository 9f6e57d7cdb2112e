//! Machine on the shop floor, assigned to a department.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub department_id: Option<EntityId>,
    /// Units per shift; informational only.
    #[serde(default)]
    pub capacity_per_shift: Option<f64>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Machine, "machine");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(100)])
        .field_labeled("department_id", "Department", vec![Rule::Required])
        .field_labeled(
            "capacity_per_shift",
            "Capacity per shift",
            vec![Rule::Range { min: 0.0, max: 1_000_000.0 }],
        )
}
