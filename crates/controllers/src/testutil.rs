//! Shared fixtures for controller tests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use milladmin_core::{EntityId, EntityRecord};
use milladmin_gateway::InMemoryGateway;

/// Category-like record: name, active flag, ordering number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Item {
    pub id: EntityId,
    pub name: String,
    pub status: bool,
    #[serde(default)]
    pub sequence: Option<i64>,
}

impl EntityRecord for Item {
    const ENTITY: &'static str = "category";

    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.status
    }

    fn set_active(&mut self, active: bool) {
        self.status = active;
    }

    fn sequence(&self) -> Option<i64> {
        self.sequence
    }
}

/// Gateway with `n` seeded rows named `Item 0..n`, sequence = index.
pub(crate) fn seeded_gateway(n: usize) -> (Arc<InMemoryGateway>, Vec<EntityId>) {
    let ids: Vec<EntityId> = (0..n).map(|_| EntityId::generate()).collect();
    let gw = InMemoryGateway::new();
    gw.seed(
        "category",
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                json!({
                    "id": id,
                    "name": format!("Item {i}"),
                    "status": true,
                    "sequence": i as i64,
                })
            })
            .collect(),
    );
    (Arc::new(gw), ids)
}
