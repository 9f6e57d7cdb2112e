//! `milladmin-store` — per-entity collection state and its mutations.
//!
//! One [`EntityStore`] per entity type is the single writer for that
//! collection. Every operation goes through the Remote Gateway, resolves to
//! an explicit `AdminResult`, and leaves the collection untouched on
//! failure.

pub mod entity_store;
pub mod state;

pub use entity_store::{CreatePolicy, EntityStore, FetchOutcome};
pub use state::CollectionState;
