//! Record trait: the interface every CRUD-managed entity type implements.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::id::EntityId;

/// A CRUD-manageable record (Branch, Product, Labour, ...).
///
/// `ENTITY` is the lowercase url segment used by the REST endpoints
/// (`admin/<entity>/get-data` etc.) and doubles as the display name seed
/// for exports.
pub trait EntityRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const ENTITY: &'static str;

    /// Unique identifier within the collection.
    fn id(&self) -> EntityId;

    /// Active flag toggled by the status-update endpoint.
    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Optional ordering number (categories, departments).
    fn sequence(&self) -> Option<i64> {
        None
    }
}
