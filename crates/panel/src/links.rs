//! URL helpers for media paths and shareable links.

use milladmin_core::EntityId;

/// Resolve a possibly-relative media path against the media base URL.
/// Absolute URLs pass through untouched.
pub fn resolve_media(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Shareable read-only link to a quotation.
pub fn quote_share_link(frontend_base: &str, quote_id: EntityId) -> String {
    format!("{}/quotation/view/{quote_id}", frontend_base.trim_end_matches('/'))
}
