//! Labour grade (skill/pay band).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: EntityId,
    pub name: String,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Grade, "grade");

pub fn rules() -> RuleSet {
    RuleSet::new().field("name", vec![Rule::Required, Rule::MaxLen(50)])
}
