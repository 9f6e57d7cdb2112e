//! Panel-level containment for unexpected errors.
//!
//! Validation and gateway failures travel through `AdminResult`; anything
//! else (a programmer error in a render/projection path) is caught here and
//! replaced with a fallback message instead of taking the process down.

use std::panic::{AssertUnwindSafe, catch_unwind};

/// Run a rendering closure, turning a panic into a fallback message.
pub fn guarded<T>(label: &str, f: impl FnOnce() -> T, fallback: impl FnOnce(&str) -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            let message = panic_message(&payload);
            tracing::error!(%label, %message, "panel section failed, rendering fallback");
            fallback(&message)
        }
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected error".to_string()
    }
}
