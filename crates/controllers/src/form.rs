//! Form controller: one create-or-edit modal transaction.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use milladmin_core::{AdminError, AdminResult, EntityId, EntityRecord};
use milladmin_store::EntityStore;
use milladmin_validation::{FieldErrors, FieldValues, RuleSet};

/// Whether the open form creates a new record or edits an existing one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

/// How a submit attempt ended.
#[derive(Debug, Clone)]
pub enum SubmitOutcome<R> {
    /// The gateway accepted; form is closed and the draft destroyed.
    Saved(R),
    /// Validation failed; nothing was sent, errors are on the draft.
    Invalid(FieldErrors),
    /// Ignored: the form is closed or a submission is already in flight.
    Blocked,
}

/// Read-only view of the form for rendering.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub mode: Option<FormMode>,
    pub submitting: bool,
    pub values: FieldValues,
    pub touched: BTreeSet<String>,
    pub errors: FieldErrors,
    pub submit_error: Option<String>,
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    values: FieldValues,
    touched: BTreeSet<String>,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl Inner {
    fn closed() -> Self {
        Self {
            phase: Phase::Closed,
            values: FieldValues::new(),
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            submit_error: None,
        }
    }

    fn opened(mode: FormMode, values: FieldValues) -> Self {
        Self {
            phase: Phase::Open(mode),
            values,
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            submit_error: None,
        }
    }
}

/// Drives one create/edit form against an [`EntityStore`].
///
/// Lifecycle: `Closed → Open(Create|Edit) → Submitting → Closed` on
/// success, or back to `Open` with the values intact and a submit error on
/// failure. Cheap to clone; clones share the draft.
pub struct FormController<R: EntityRecord> {
    store: EntityStore<R>,
    rules: RuleSet,
    inner: Arc<Mutex<Inner>>,
}

impl<R: EntityRecord> Clone for FormController<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            rules: self.rules.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: EntityRecord> FormController<R> {
    pub fn new(store: EntityStore<R>, rules: RuleSet) -> Self {
        Self {
            store,
            rules,
            inner: Arc::new(Mutex::new(Inner::closed())),
        }
    }

    /// Open with an empty draft.
    pub fn open_create(&self) {
        *self.inner.lock().unwrap() = Inner::opened(FormMode::Create, FieldValues::new());
    }

    /// Open pre-filled from an existing record.
    pub fn open_edit(&self, record: &R) {
        let values = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => FieldValues::new(),
        };
        *self.inner.lock().unwrap() = Inner::opened(FormMode::Edit(record.id()), values);
    }

    /// Close and destroy the draft.
    pub fn close(&self) {
        *self.inner.lock().unwrap() = Inner::closed();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.lock().unwrap();
        FormSnapshot {
            mode: match inner.phase {
                Phase::Closed => None,
                Phase::Open(mode) | Phase::Submitting(mode) => Some(mode),
            },
            submitting: matches!(inner.phase, Phase::Submitting(_)),
            values: inner.values.clone(),
            touched: inner.touched.clone(),
            errors: inner.errors.clone(),
            submit_error: inner.submit_error.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.inner.lock().unwrap().phase, Phase::Closed)
    }

    /// Record a field change; marks the field touched and re-validates it.
    ///
    /// Ignored while closed or submitting (inputs are disabled then).
    pub fn set_field(&self, name: &str, value: Value) {
        let mut inner = self.inner.lock().unwrap();
        if !matches!(inner.phase, Phase::Open(_)) {
            return;
        }
        inner.values.insert(name.to_string(), value);
        inner.touched.insert(name.to_string());
        match self.rules.validate_field(name, &inner.values) {
            Some(msg) => {
                inner.errors.insert(name.to_string(), msg);
            }
            None => {
                inner.errors.remove(name);
            }
        }
    }

    /// Validate and submit the draft.
    ///
    /// Invalid drafts never reach the gateway. While a submission is in
    /// flight further calls resolve to `Blocked` (duplicate-click guard).
    pub async fn submit(&self) -> AdminResult<SubmitOutcome<R>> {
        let (mode, values) = {
            let mut inner = self.inner.lock().unwrap();
            let mode = match inner.phase {
                Phase::Open(mode) => mode,
                Phase::Submitting(_) | Phase::Closed => return Ok(SubmitOutcome::Blocked),
            };

            let errors = self.rules.validate(&inner.values);
            if !errors.is_empty() {
                inner.errors = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }

            inner.phase = Phase::Submitting(mode);
            inner.submit_error = None;
            (mode, inner.values.clone())
        };

        let payload = draft_payload(values);
        let result = match mode {
            FormMode::Create => self.store.create(payload).await,
            FormMode::Edit(id) => self.store.update(id, payload).await,
        };

        match result {
            Ok(record) => {
                *self.inner.lock().unwrap() = Inner::closed();
                Ok(SubmitOutcome::Saved(record))
            }
            Err(err) => {
                let mut inner = self.inner.lock().unwrap();
                inner.phase = Phase::Open(mode);
                if let AdminError::Validation(fields) = &err {
                    inner.errors.extend(fields.clone());
                }
                inner.submit_error = Some(err.message());
                Err(err)
            }
        }
    }
}

/// Draft values minus the server-computed fields.
fn draft_payload(values: FieldValues) -> Value {
    let map: serde_json::Map<String, Value> = values
        .into_iter()
        .filter(|(key, _)| !matches!(key.as_str(), "id" | "created_at" | "updated_at"))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Item, seeded_gateway};

    use std::collections::VecDeque;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use milladmin_gateway::{ApiEnvelope, ApiRequest, GatewayError, ListQuery, RemoteGateway};
    use milladmin_validation::Rule;

    fn item_rules() -> RuleSet {
        RuleSet::new()
            .field("name", vec![Rule::Required, Rule::MaxLen(100)])
            .field("sequence", vec![Rule::Range { min: 0.0, max: 9999.0 }])
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_gateway() {
        let (gw, _) = seeded_gateway(2);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let form = FormController::new(store, item_rules());

        form.open_create();
        form.set_field("sequence", json!(5));
        let outcome = form.submit().await.unwrap();

        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors["name"], "Name is required");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(gw.call_count("admin/category/store"), 0);
        assert!(form.is_open(), "form stays open on validation failure");
    }

    #[tokio::test]
    async fn successful_create_closes_and_destroys_the_draft() {
        let (gw, _) = seeded_gateway(2);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        store.fetch_list(ListQuery::default()).await.unwrap();
        let form = FormController::new(store.clone(), item_rules());

        form.open_create();
        form.set_field("name", json!("New Item"));
        let outcome = form.submit().await.unwrap();

        let record = match outcome {
            SubmitOutcome::Saved(record) => record,
            other => panic!("expected Saved, got {other:?}"),
        };
        assert_eq!(record.name, "New Item");
        assert!(!form.is_open());
        assert!(form.snapshot().values.is_empty());
        // Refetch landed the new record in the collection exactly once.
        let items = store.snapshot().items;
        assert_eq!(items.iter().filter(|r| r.id == record.id).count(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_keeps_form_open_with_values_intact() {
        let (gw, _) = seeded_gateway(2);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let form = FormController::new(store, item_rules());

        form.open_create();
        form.set_field("name", json!("New Item"));
        gw.fail_next(GatewayError::Server { status: 500, message: "server exploded".to_string() });

        let err = form.submit().await.unwrap_err();
        assert_eq!(err.message(), "server exploded");

        let snap = form.snapshot();
        assert!(form.is_open());
        assert!(!snap.submitting);
        assert_eq!(snap.values["name"], json!("New Item"));
        assert_eq!(snap.submit_error.as_deref(), Some("server exploded"));
    }

    #[tokio::test]
    async fn server_validation_errors_land_on_fields() {
        let (gw, _) = seeded_gateway(2);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let form = FormController::new(store, item_rules());

        form.open_create();
        form.set_field("name", json!("Duplicate"));
        gw.fail_next(GatewayError::Validation(
            [("name".to_string(), "Name already taken".to_string())].into(),
        ));

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(form.snapshot().errors["name"], "Name already taken");
    }

    #[tokio::test]
    async fn edit_prefills_and_updates_in_place() {
        let (gw, ids) = seeded_gateway(3);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        store.fetch_list(ListQuery::default()).await.unwrap();
        let form = FormController::new(store.clone(), item_rules());

        let record = store.snapshot().items[1].clone();
        form.open_edit(&record);
        assert_eq!(form.snapshot().values["name"], json!("Item 1"));

        form.set_field("name", json!("Renamed"));
        form.submit().await.unwrap();

        let items = store.snapshot().items;
        assert_eq!(items.iter().find(|r| r.id == ids[1]).unwrap().name, "Renamed");
        assert_eq!(items.len(), 3);
    }

    struct SlowGateway {
        inner: std::sync::Arc<milladmin_gateway::InMemoryGateway>,
        delays: Mutex<VecDeque<Duration>>,
    }

    #[async_trait]
    impl RemoteGateway for SlowGateway {
        async fn call(&self, request: ApiRequest) -> Result<ApiEnvelope, GatewayError> {
            let delay = self.delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.inner.call(request).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn second_click_while_submitting_is_blocked() {
        let (gw, _) = seeded_gateway(1);
        let slow = std::sync::Arc::new(SlowGateway {
            inner: gw.clone(),
            delays: Mutex::new(VecDeque::from([Duration::from_millis(100)])),
        });
        let store: EntityStore<Item> = EntityStore::new(slow);
        let form = FormController::new(store, item_rules());

        form.open_create();
        form.set_field("name", json!("Once"));

        let first = {
            let form = form.clone();
            tokio::spawn(async move { form.submit().await })
        };
        tokio::task::yield_now().await;
        assert!(form.snapshot().submitting);

        let second = form.submit().await.unwrap();
        assert!(matches!(second, SubmitOutcome::Blocked));

        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, SubmitOutcome::Saved(_)));
        assert_eq!(gw.call_count("admin/category/store"), 1);
    }
}
