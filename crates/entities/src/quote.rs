//! Customer quotation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: EntityId,
    /// Server-assigned quote number.
    #[serde(default)]
    pub quote_number: Option<String>,
    #[serde(default)]
    pub customer_id: Option<EntityId>,
    pub amount: f64,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Quote, "quote");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field_labeled("customer_id", "Customer", vec![Rule::Required])
        .field("amount", vec![Rule::Required, Rule::Range { min: 0.0, max: 100_000_000.0 }])
}
