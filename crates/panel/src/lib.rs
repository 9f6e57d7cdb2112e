//! `milladmin-panel` — wiring for the admin panel core.
//!
//! Builds the per-entity stores over one shared gateway, loads environment
//! configuration, and provides the small link helpers the panel screens
//! need (media paths, quotation share links).

pub mod boundary;
pub mod config;
pub mod links;
pub mod services;

pub use config::Config;
pub use services::AdminServices;
