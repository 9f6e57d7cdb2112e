//! `milladmin-controllers` — headless list/form logic.
//!
//! A [`ListController`] drives one paginated/filterable table view over an
//! `EntityStore`; a [`FormController`] drives one create-or-edit modal
//! transaction; a [`SequenceEditor`] handles optimistic debounced edits of
//! ordering fields. All three are transport- and rendering-agnostic.

pub mod form;
pub mod list;
pub mod sequence;

#[cfg(test)]
mod testutil;

pub use form::{FormController, FormMode, FormSnapshot, SubmitOutcome};
pub use list::{ListController, PaginationMode, SortOrder, TableState};
pub use sequence::SequenceEditor;
