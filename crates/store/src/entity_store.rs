//! The per-entity store: fetch, create, update, remove, status toggle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde_json::{Value, json};

use milladmin_core::{AdminError, AdminResult, EntityId, EntityRecord};
use milladmin_gateway::{ApiRequest, ListQuery, RemoteGateway, endpoints};

use crate::state::CollectionState;

/// How a successful create lands in local state.
///
/// `Refetch` (the default) re-runs the last list query so server-computed
/// fields (id, timestamps, flags) are always accurate. `Prepend` unshifts
/// the returned record without a round trip.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CreatePolicy {
    #[default]
    Refetch,
    Prepend,
}

/// Result of a list fetch.
///
/// A fetch that was superseded by a newer one while in flight resolves to
/// `Superseded` and leaves the collection exactly as the newer fetch wrote
/// it; a late response never overwrites fresher data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied(usize),
    Superseded,
}

struct Inner<R> {
    gateway: Arc<dyn RemoteGateway>,
    state: RwLock<CollectionState<R>>,
    fetch_generation: AtomicU64,
    last_query: Mutex<ListQuery>,
    create_policy: CreatePolicy,
}

/// Single source of truth for one entity type's collection.
///
/// Cheap to clone; all clones share the same state. The store is the only
/// logical writer for its collection, so cross-entity races cannot happen.
/// Two in-flight `update` calls for the same id are last-write-wins.
pub struct EntityStore<R: EntityRecord> {
    inner: Arc<Inner<R>>,
}

impl<R: EntityRecord> Clone for EntityStore<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: EntityRecord> EntityStore<R> {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self::with_policy(gateway, CreatePolicy::default())
    }

    pub fn with_policy(gateway: Arc<dyn RemoteGateway>, create_policy: CreatePolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                state: RwLock::new(CollectionState::default()),
                fetch_generation: AtomicU64::new(0),
                last_query: Mutex::new(ListQuery::default()),
                create_policy,
            }),
        }
    }

    /// Current collection snapshot.
    pub fn snapshot(&self) -> CollectionState<R> {
        self.inner.state.read().unwrap().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().unwrap().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.read().unwrap().error.clone()
    }

    pub fn total(&self) -> u64 {
        self.inner.state.read().unwrap().total
    }

    /// Replace the collection from the server.
    ///
    /// Sets the loading flag for the duration of the call. Only the most
    /// recently dispatched fetch is allowed to land (generation guard).
    pub async fn fetch_list(&self, query: ListQuery) -> AdminResult<FetchOutcome> {
        let generation = self.inner.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.inner.state.write().unwrap();
            state.loading = true;
            state.error = None;
        }
        *self.inner.last_query.lock().unwrap() = query.clone();

        let request = ApiRequest::post(endpoints::get_data(R::ENTITY), query.to_body());
        let result = self.inner.gateway.call(request).await;

        if self.inner.fetch_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(entity = R::ENTITY, generation, "list fetch superseded, dropping response");
            return Ok(FetchOutcome::Superseded);
        }

        let outcome = match result {
            Ok(envelope) => match serde_json::from_value::<Vec<R>>(envelope.data) {
                Ok(items) => Ok((items, envelope.total)),
                Err(e) => Err(AdminError::gateway(format!("malformed list response: {e}"))),
            },
            Err(err) => Err(err.into()),
        };

        // Re-check the generation under the write lock; the cheap check
        // above can race with a newer fetch landing on another thread.
        match outcome {
            Ok((items, total)) => {
                let count = items.len();
                let mut state = self.inner.state.write().unwrap();
                if self.inner.fetch_generation.load(Ordering::SeqCst) != generation {
                    return Ok(FetchOutcome::Superseded);
                }
                state.total = total.unwrap_or(count as u64);
                state.items = items;
                state.loading = false;
                Ok(FetchOutcome::Applied(count))
            }
            Err(err) => {
                let mut state = self.inner.state.write().unwrap();
                if self.inner.fetch_generation.load(Ordering::SeqCst) != generation {
                    return Ok(FetchOutcome::Superseded);
                }
                state.loading = false;
                state.error = Some(err.message());
                Err(err)
            }
        }
    }

    /// Re-run the last list query.
    pub async fn refetch(&self) -> AdminResult<FetchOutcome> {
        let query = self.inner.last_query.lock().unwrap().clone();
        self.fetch_list(query).await
    }

    /// Create a record; local landing per [`CreatePolicy`].
    pub async fn create(&self, payload: Value) -> AdminResult<R> {
        let request = ApiRequest::post(endpoints::store(R::ENTITY), payload);
        let envelope = self.inner.gateway.call(request).await?;
        let record: R = serde_json::from_value(envelope.data)
            .map_err(|e| AdminError::gateway(format!("malformed create response: {e}")))?;

        tracing::info!(entity = R::ENTITY, id = %record.id(), "record created");
        match self.inner.create_policy {
            CreatePolicy::Prepend => {
                let mut state = self.inner.state.write().unwrap();
                state.items.insert(0, record.clone());
                state.total += 1;
            }
            CreatePolicy::Refetch => {
                // The record is already stored server-side; a failed refetch
                // must not be reported as a failed create. The fetch error
                // stays on the collection state for the view.
                if let Err(err) = self.refetch().await {
                    tracing::warn!(entity = R::ENTITY, error = %err.message(), "refetch after create failed");
                }
            }
        }
        Ok(record)
    }

    /// Update a record in place by id. A response for an id not currently
    /// in the collection is a no-op (never appends).
    pub async fn update(&self, id: EntityId, payload: Value) -> AdminResult<R> {
        let request = ApiRequest::put(endpoints::update(R::ENTITY, id), payload);
        let envelope = self.inner.gateway.call(request).await?;
        let record: R = serde_json::from_value(envelope.data)
            .map_err(|e| AdminError::gateway(format!("malformed update response: {e}")))?;

        let mut state = self.inner.state.write().unwrap();
        if let Some(slot) = state.items.iter_mut().find(|r| r.id() == id) {
            *slot = record.clone();
        }
        tracing::info!(entity = R::ENTITY, %id, "record updated");
        Ok(record)
    }

    /// Remove a record by id.
    pub async fn remove(&self, id: EntityId) -> AdminResult<()> {
        let request = ApiRequest::delete(endpoints::delete(R::ENTITY, id));
        self.inner.gateway.call(request).await?;

        let mut state = self.inner.state.write().unwrap();
        let before = state.items.len();
        state.items.retain(|r| r.id() != id);
        if state.items.len() < before {
            state.total = state.total.saturating_sub(1);
        }
        tracing::info!(entity = R::ENTITY, %id, "record removed");
        Ok(())
    }

    /// Toggle the active flag; a restricted update with replace-in-place
    /// semantics limited to the status field.
    pub async fn set_active(&self, id: EntityId, active: bool) -> AdminResult<()> {
        let request = ApiRequest::post(
            endpoints::status_update(R::ENTITY),
            json!({ "id": id, "status": active }),
        );
        self.inner.gateway.call(request).await?;

        let mut state = self.inner.state.write().unwrap();
        if let Some(slot) = state.items.iter_mut().find(|r| r.id() == id) {
            slot.set_active(active);
        }
        tracing::info!(entity = R::ENTITY, %id, active, "status updated");
        Ok(())
    }
}
