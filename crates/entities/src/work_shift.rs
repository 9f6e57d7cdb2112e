//! Work shift with start/end times (HH:MM).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use milladmin_core::EntityId;
use milladmin_validation::{Rule, RuleSet};

use crate::macros::impl_entity_record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkShift {
    pub id: EntityId,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub status: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity_record!(WorkShift, "work-shift");

pub fn rules() -> RuleSet {
    let time = regex::Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("static regex");
    RuleSet::new()
        .field("name", vec![Rule::Required, Rule::MaxLen(50)])
        .field_labeled(
            "start_time",
            "Start time",
            vec![
                Rule::Required,
                Rule::Pattern {
                    pattern: time.clone(),
                    message: "Enter start time as HH:MM".to_string(),
                },
            ],
        )
        .field_labeled(
            "end_time",
            "End time",
            vec![
                Rule::Required,
                Rule::Pattern {
                    pattern: time,
                    message: "Enter end time as HH:MM".to_string(),
                },
                Rule::NotEqual {
                    field: "start_time".to_string(),
                    message: "End time must differ from start time".to_string(),
                },
            ],
        )
}
