//! Optimistic debounced editor for ordering fields.
//!
//! Sequence numbers (category/department ordering) are edited inline in the
//! table: the local value updates immediately, the persist call fires on
//! the trailing edge of a debounce window, and bad input is silently
//! dropped before the timer arms. A failed persist rolls the local value
//! back to the last confirmed one instead of silently diverging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use milladmin_core::{EntityId, EntityRecord};
use milladmin_store::EntityStore;

const DEFAULT_SEQUENCE_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Debug)]
struct SeqState {
    confirmed: i64,
    local: i64,
    pending: bool,
    last_error: Option<String>,
}

/// Debounced editor for one record's sequence number.
pub struct SequenceEditor<R: EntityRecord> {
    store: EntityStore<R>,
    id: EntityId,
    min: i64,
    max: i64,
    debounce: Duration,
    state: Arc<Mutex<SeqState>>,
    generation: Arc<AtomicU64>,
}

impl<R: EntityRecord> Clone for SequenceEditor<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            id: self.id,
            min: self.min,
            max: self.max,
            debounce: self.debounce,
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<R: EntityRecord> SequenceEditor<R> {
    pub fn new(store: EntityStore<R>, id: EntityId, current: i64) -> Self {
        Self {
            store,
            id,
            min: 0,
            max: 9999,
            debounce: DEFAULT_SEQUENCE_DEBOUNCE,
            state: Arc::new(Mutex::new(SeqState {
                confirmed: current,
                local: current,
                pending: false,
                last_error: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Value the table cell shows right now (optimistic).
    pub fn value(&self) -> i64 {
        self.state.lock().unwrap().local
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().unwrap().pending
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().unwrap().last_error.clone()
    }

    /// Record a keystroke.
    ///
    /// Non-numeric or out-of-range input is dropped without arming the
    /// timer (not surfaced as a validation error). Valid input applies to
    /// the local value immediately and schedules the persist; a burst of
    /// edits persists only the final value.
    pub fn edit(&self, input: &str) {
        let value = match input.trim().parse::<i64>() {
            Ok(v) if v >= self.min && v <= self.max => v,
            _ => return,
        };

        {
            let mut state = self.state.lock().unwrap();
            state.local = value;
            state.pending = true;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.debounce).await;
            if this.generation.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = this.store.update(this.id, json!({ "sequence": value })).await;
            let still_current = this.generation.load(Ordering::SeqCst) == generation;

            let mut state = this.state.lock().unwrap();
            match result {
                Ok(_) => {
                    state.confirmed = value;
                    if still_current {
                        state.pending = false;
                        state.last_error = None;
                    }
                }
                Err(err) => {
                    let message = err.message();
                    tracing::warn!(entity = R::ENTITY, id = %this.id, error = %message, "sequence persist failed");
                    if still_current {
                        // Roll the optimistic value back to the last
                        // confirmed one.
                        state.local = state.confirmed;
                        state.pending = false;
                        state.last_error = Some(message);
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Item, seeded_gateway};

    use milladmin_gateway::{GatewayError, ListQuery};

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_persists_only_the_final_value() {
        let (gw, ids) = seeded_gateway(5);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        store.fetch_list(ListQuery::default()).await.unwrap();

        let editor = SequenceEditor::new(store.clone(), ids[2], 2);
        editor.edit("7");
        editor.edit("71");
        editor.edit("714");
        assert_eq!(editor.value(), 714, "local value is optimistic");

        tokio::time::sleep(Duration::from_millis(1600)).await;
        settle().await;

        assert_eq!(gw.call_count(&format!("admin/category/update/{}", ids[2])), 1);
        assert_eq!(editor.value(), 714);
        assert!(!editor.is_pending());
        let row = store.snapshot().items.iter().find(|r| r.id == ids[2]).cloned().unwrap();
        assert_eq!(row.sequence, Some(714));
    }

    #[tokio::test(start_paused = true)]
    async fn bad_input_is_silently_dropped() {
        let (gw, ids) = seeded_gateway(3);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        store.fetch_list(ListQuery::default()).await.unwrap();

        let editor = SequenceEditor::new(store, ids[0], 1).with_range(0, 100);
        editor.edit("abc");
        editor.edit("-4");
        editor.edit("101");
        assert_eq!(editor.value(), 1, "invalid input never applies");

        tokio::time::sleep(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(gw.call_count("admin/category/update"), 0);
        assert!(editor.last_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_persist_rolls_back_the_optimistic_value() {
        let (gw, ids) = seeded_gateway(3);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        store.fetch_list(ListQuery::default()).await.unwrap();

        let editor = SequenceEditor::new(store, ids[1], 1);
        editor.edit("42");
        gw.fail_next(GatewayError::Server { status: 500, message: "write failed".to_string() });

        tokio::time::sleep(Duration::from_millis(1600)).await;
        settle().await;

        assert_eq!(editor.value(), 1, "rolled back to last confirmed value");
        assert_eq!(editor.last_error().as_deref(), Some("write failed"));
        assert!(!editor.is_pending());
    }
}
