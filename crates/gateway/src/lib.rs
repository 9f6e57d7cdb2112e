//! `milladmin-gateway` — the Remote Gateway seam.
//!
//! All server communication goes through the [`RemoteGateway`] trait: the
//! stores never see a transport type, only `ApiRequest` in and
//! `ApiEnvelope`/`GatewayError` out. Two implementations are provided:
//! [`HttpGateway`] (reqwest, for a real backend) and [`InMemoryGateway`]
//! (in-process tables, for tests and offline demo mode).

pub mod error;
pub mod http;
pub mod memory;
pub mod request;

use async_trait::async_trait;

pub use error::GatewayError;
pub use http::HttpGateway;
pub use memory::InMemoryGateway;
pub use request::{ApiEnvelope, ApiRequest, ListQuery, Method, PageRequest, endpoints};

/// Uniform async call surface for the backend.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn call(&self, request: ApiRequest) -> Result<ApiEnvelope, GatewayError>;
}
