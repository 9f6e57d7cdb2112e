//! Request/response shapes shared by every gateway implementation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// HTTP-ish method of a gateway call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One outbound gateway call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, path: path.into(), body: Some(body) }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Put, path: path.into(), body: Some(body) }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), body: None }
    }
}

/// Uniform success response shape: `{data, message?, total?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl ApiEnvelope {
    pub fn of(data: Value) -> Self {
        Self { data, message: None, total: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}

/// Server-side page window (0-based index).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

/// Parameters of one list fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<PageRequest>,
}

impl ListQuery {
    pub fn searched(text: impl Into<String>) -> Self {
        Self { search: Some(text.into()), page: None }
    }

    pub fn paged(index: usize, size: usize) -> Self {
        Self { search: None, page: Some(PageRequest { index, size }) }
    }

    /// Body carried by the `get-data` call.
    pub fn to_body(&self) -> Value {
        json!({
            "search": self.search,
            "page": self.page.map(|p| p.index),
            "per_page": self.page.map(|p| p.size),
        })
    }
}

/// REST-ish endpoint paths, `admin/<entity>/...`.
pub mod endpoints {
    use milladmin_core::EntityId;

    pub fn get_data(entity: &str) -> String {
        format!("admin/{entity}/get-data")
    }

    pub fn store(entity: &str) -> String {
        format!("admin/{entity}/store")
    }

    pub fn update(entity: &str, id: EntityId) -> String {
        format!("admin/{entity}/update/{id}")
    }

    pub fn delete(entity: &str, id: EntityId) -> String {
        format!("admin/{entity}/delete/{id}")
    }

    pub fn status_update(entity: &str) -> String {
        format!("admin/{entity}/status-update")
    }
}
