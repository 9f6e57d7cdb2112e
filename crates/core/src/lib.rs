//! `milladmin-core` — shared building blocks for the admin panel core.
//!
//! This crate contains **pure domain** primitives (no transport or runtime
//! concerns): identifiers, the record trait every CRUD entity implements,
//! and the error model every async operation resolves to.

pub mod error;
pub mod id;
pub mod record;

pub use error::{AdminError, AdminResult};
pub use id::EntityId;
pub use record::EntityRecord;
