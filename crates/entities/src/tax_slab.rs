//! Tax slab applied to invoices and quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub id: EntityId,
    pub name: String,
    pub percent: f64,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(TaxSlab, "tax-slab");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(50)])
        .field_labeled(
            "percent",
            "Tax percent",
            vec![Rule::Required, Rule::Range { min: 0.0, max: 100.0 }],
        )
}
