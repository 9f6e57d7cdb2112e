//! `milladmin-export` — client-side CSV and print rendering of a table.
//!
//! Both builders are pure: they return the blob/document string plus a
//! filename where applicable; saving the file or opening the print dialog
//! is the caller's concern.

pub mod csv;
pub mod print;

pub use csv::{CsvExport, csv_export};
pub use print::print_document;
