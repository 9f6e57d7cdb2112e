//! Labour: a worker on the floor, tied to a grade and department.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labour {
    pub id: EntityId,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub grade_id: Option<EntityId>,
    #[serde(default)]
    pub department_id: Option<EntityId>,
    #[serde(default)]
    pub daily_wage: Option<f64>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Labour, "labour");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(100)])
        .field_labeled("mobile", "Mobile number", vec![Rule::Required, Rule::Digits(10)])
        .field_labeled("grade_id", "Grade", vec![Rule::Required])
        .field_labeled("daily_wage", "Daily wage", vec![Rule::Range { min: 0.0, max: 100_000.0 }])
}
