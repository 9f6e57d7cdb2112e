//! Finished/raw product in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub product_type_id: Option<EntityId>,
    #[serde(default)]
    pub uom_id: Option<EntityId>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Relative media path; resolved against the media base URL.
    #[serde(default)]
    pub image: Option<String>,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(Product, "product");

pub fn rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(150)])
        .field_labeled("sku", "SKU", vec![Rule::Required, Rule::MaxLen(40)])
        .field_labeled("category_id", "Category", vec![Rule::Required])
        .field_labeled("uom_id", "Unit of measure", vec![Rule::Required])
        .field("price", vec![Rule::Range { min: 0.0, max: 10_000_000.0 }])
}
