//! In-process gateway serving the full CRUD surface from owned tables.
//!
//! Used as the test double everywhere and as the panel's offline demo mode.
//! Records are plain JSON objects keyed by their `"id"` field; insertion
//! order is newest-first, matching the backend's list order.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::request::{ApiEnvelope, ApiRequest};
use crate::RemoteGateway;

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    calls: Mutex<Vec<ApiRequest>>,
    fail_next: Mutex<Option<GatewayError>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a table (rows kept in the given order).
    pub fn seed(&self, entity: &str, rows: Vec<Value>) {
        self.tables.lock().unwrap().insert(entity.to_string(), rows);
    }

    /// Make the next call fail with the given error.
    pub fn fail_next(&self, err: GatewayError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests whose path starts with `prefix`.
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path.starts_with(prefix))
            .count()
    }

    pub fn rows(&self, entity: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(entity)
            .cloned()
            .unwrap_or_default()
    }

    fn list(&self, entity: &str, body: Option<&Value>) -> ApiEnvelope {
        let tables = self.tables.lock().unwrap();
        let rows = tables.get(entity).cloned().unwrap_or_default();

        let search = body
            .and_then(|b| b.get("search"))
            .and_then(Value::as_str)
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());

        let filtered: Vec<Value> = match &search {
            Some(needle) => rows
                .into_iter()
                .filter(|row| row_matches(row, needle))
                .collect(),
            None => rows,
        };
        let total = filtered.len() as u64;

        let page = body.and_then(|b| b.get("page")).and_then(Value::as_u64);
        let per_page = body.and_then(|b| b.get("per_page")).and_then(Value::as_u64);
        let visible = match (page, per_page) {
            (Some(page), Some(size)) => filtered
                .into_iter()
                .skip((page * size) as usize)
                .take(size as usize)
                .collect(),
            _ => filtered,
        };

        ApiEnvelope::of(Value::Array(visible)).with_total(total)
    }

    fn store(&self, entity: &str, body: Option<&Value>) -> Result<ApiEnvelope, GatewayError> {
        let mut record = match body {
            Some(Value::Object(map)) => Value::Object(map.clone()),
            _ => return Err(bad_request("store requires a JSON object body")),
        };
        let obj = record.as_object_mut().unwrap();
        if !obj.contains_key("id") {
            obj.insert("id".to_string(), json!(Uuid::now_v7().to_string()));
        }
        obj.entry("status").or_insert(json!(true));
        let now = Utc::now().to_rfc3339();
        obj.insert("created_at".to_string(), json!(now));
        obj.insert("updated_at".to_string(), json!(now));

        let mut tables = self.tables.lock().unwrap();
        tables
            .entry(entity.to_string())
            .or_default()
            .insert(0, record.clone());

        Ok(ApiEnvelope::of(record).with_message("Created successfully"))
    }

    fn update(&self, entity: &str, id: &str, body: Option<&Value>) -> Result<ApiEnvelope, GatewayError> {
        let patch = match body {
            Some(Value::Object(map)) => map.clone(),
            _ => return Err(bad_request("update requires a JSON object body")),
        };

        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(entity.to_string()).or_default();
        let row = rows
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| not_found(entity, id))?;

        let obj = row.as_object_mut().ok_or_else(|| bad_request("stored row is not an object"))?;
        for (key, value) in patch {
            obj.insert(key, value);
        }
        obj.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        Ok(ApiEnvelope::of(row.clone()).with_message("Updated successfully"))
    }

    fn delete(&self, entity: &str, id: &str) -> Result<ApiEnvelope, GatewayError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(entity.to_string()).or_default();
        let before = rows.len();
        rows.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if rows.len() == before {
            return Err(not_found(entity, id));
        }
        Ok(ApiEnvelope::of(Value::Null).with_message("Deleted successfully"))
    }

    fn status_update(&self, entity: &str, body: Option<&Value>) -> Result<ApiEnvelope, GatewayError> {
        let id = body
            .and_then(|b| b.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| bad_request("status-update requires an id"))?
            .to_string();
        let status = body
            .and_then(|b| b.get("status"))
            .and_then(Value::as_bool)
            .ok_or_else(|| bad_request("status-update requires a boolean status"))?;

        self.update(entity, &id, Some(&json!({ "status": status })))
            .map(|env| env.with_message("Status updated successfully"))
    }
}

#[async_trait]
impl RemoteGateway for InMemoryGateway {
    async fn call(&self, request: ApiRequest) -> Result<ApiEnvelope, GatewayError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }

        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        let (entity, action, id) = match segments.as_slice() {
            ["admin", entity, action] => (*entity, *action, None),
            ["admin", entity, action, id] => (*entity, *action, Some(*id)),
            _ => return Err(not_found("route", &request.path)),
        };

        match (action, id) {
            ("get-data", None) => Ok(self.list(entity, request.body.as_ref())),
            ("store", None) => self.store(entity, request.body.as_ref()),
            ("update", Some(id)) => self.update(entity, id, request.body.as_ref()),
            ("delete", Some(id)) => self.delete(entity, id),
            ("status-update", None) => self.status_update(entity, request.body.as_ref()),
            _ => Err(not_found("route", &request.path)),
        }
    }
}

fn row_matches(row: &Value, needle: &str) -> bool {
    match row {
        Value::Object(map) => map.values().any(|v| match v {
            Value::String(s) => s.to_lowercase().contains(needle),
            Value::Number(n) => n.to_string().contains(needle),
            _ => false,
        }),
        _ => false,
    }
}

fn not_found(what: &str, id: &str) -> GatewayError {
    GatewayError::Server {
        status: 404,
        message: format!("{what} {id} not found"),
    }
}

fn bad_request(message: &str) -> GatewayError {
    GatewayError::Server {
        status: 400,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ListQuery, endpoints};

    fn seeded() -> InMemoryGateway {
        let gw = InMemoryGateway::new();
        gw.seed(
            "branch",
            vec![
                json!({"id": "b1", "name": "HQ", "mobile": "9876543210", "status": true}),
                json!({"id": "b2", "name": "East Yard", "mobile": "9000000001", "status": true}),
                json!({"id": "b3", "name": "West Yard", "mobile": "9000000002", "status": false}),
            ],
        );
        gw
    }

    #[tokio::test]
    async fn get_data_filters_and_pages() {
        let gw = seeded();
        let env = gw
            .call(ApiRequest::post(
                endpoints::get_data("branch"),
                ListQuery::searched("yard").to_body(),
            ))
            .await
            .unwrap();
        assert_eq!(env.total, Some(2));
        assert_eq!(env.data.as_array().unwrap().len(), 2);

        let mut query = ListQuery::paged(1, 2);
        query.search = None;
        let env = gw
            .call(ApiRequest::post(endpoints::get_data("branch"), query.to_body()))
            .await
            .unwrap();
        assert_eq!(env.total, Some(3));
        let rows = env.data.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "b3");
    }

    #[tokio::test]
    async fn store_assigns_id_and_timestamps() {
        let gw = InMemoryGateway::new();
        let env = gw
            .call(ApiRequest::post(
                endpoints::store("branch"),
                json!({"name": "HQ", "mobile": "9876543210", "address": "Main St"}),
            ))
            .await
            .unwrap();
        assert!(env.data["id"].is_string());
        assert!(env.data["created_at"].is_string());
        assert_eq!(env.data["status"], true);
        assert_eq!(env.message.as_deref(), Some("Created successfully"));
        assert_eq!(gw.rows("branch").len(), 1);
    }

    #[tokio::test]
    async fn update_merges_and_delete_removes() {
        let gw = seeded();
        let env = gw
            .call(ApiRequest::put(
                "admin/branch/update/b2",
                json!({"name": "East Dock"}),
            ))
            .await
            .unwrap();
        assert_eq!(env.data["name"], "East Dock");
        assert_eq!(env.data["mobile"], "9000000001");

        gw.call(ApiRequest::delete("admin/branch/delete/b2")).await.unwrap();
        assert!(gw.rows("branch").iter().all(|r| r["id"] != "b2"));

        let err = gw
            .call(ApiRequest::delete("admin/branch/delete/b2"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Server { status: 404, .. }));
    }

    #[tokio::test]
    async fn status_update_toggles_flag() {
        let gw = seeded();
        gw.call(ApiRequest::post(
            endpoints::status_update("branch"),
            json!({"id": "b1", "status": false}),
        ))
        .await
        .unwrap();
        let rows = gw.rows("branch");
        let b1 = rows.iter().find(|r| r["id"] == "b1").unwrap();
        assert_eq!(b1["status"], false);
    }

    #[tokio::test]
    async fn fail_next_injects_one_error() {
        let gw = seeded();
        gw.fail_next(GatewayError::Transport("offline".to_string()));
        let err = gw
            .call(ApiRequest::post(endpoints::get_data("branch"), ListQuery::default().to_body()))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));

        // Subsequent calls succeed again.
        gw.call(ApiRequest::post(endpoints::get_data("branch"), ListQuery::default().to_body()))
            .await
            .unwrap();
        assert_eq!(gw.call_count("admin/branch/get-data"), 2);
    }
}
