//! Stock discard: write off damaged/lost quantity of a product.
//!
//! The quantity cap is checked against the `available_qty` the form was
//! opened with; the server re-checks on store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDiscard {
    pub id: EntityId,
    #[serde(default)]
    pub product_id: Option<EntityId>,
    pub quantity: f64,
    /// Stock on hand when the discard was drafted.
    #[serde(default)]
    pub available_qty: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(StockDiscard, "stock-discard");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field_labeled("product_id", "Product", vec![Rule::Required])
        .field(
            "quantity",
            vec![
                Rule::Required,
                Rule::Range { min: 0.0, max: 1_000_000.0 },
                Rule::AtMostField {
                    field: "available_qty".to_string(),
                    message: "Cannot exceed available stock ({max})".to_string(),
                },
            ],
        )
        .field("reason", vec![Rule::MaxLen(200)])
}
