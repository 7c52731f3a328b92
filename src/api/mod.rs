/// Transport layer for the Prospera backend
///
/// # Architecture
///
/// - `FinanceBackend` - one async method per backend capability
/// - `http` - reqwest implementation against the REST API
/// - `client` - `ApiClient`, the handle views use; it intercepts every
///   response and turns a 401 into a session reset
///
/// # Usage
///
/// ```rust,no_run
/// use prospera::api::ApiClient;
/// use prospera::config::ClientConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let api = ApiClient::from_config(&ClientConfig::default())?;
/// let insights = api.quick_insights().await?;
/// # Ok(())
/// # }
/// ```
mod client;
mod http;

use crate::types::{AiResponse, InsightsResponse, VisualizeResponse};
use async_trait::async_trait;
use serde_json::Value;

pub use client::ApiClient;
pub use http::{HttpBackend, classify_status};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("session expired")]
    Unauthorized,

    #[error("backend error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("login failed")]
    LoginFailed,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Backend capabilities consumed by the client. Each call is a single
/// request/response round trip; nothing is retried.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait FinanceBackend: Send + Sync {
    async fn login(&self, session_id: &str, phone_number: &str) -> ApiResult<Value>;

    async fn quick_insights(&self) -> ApiResult<InsightsResponse>;

    async fn ask_ai(&self, query: &str) -> ApiResult<AiResponse>;

    async fn visualize(&self, query: &str) -> ApiResult<VisualizeResponse>;

    async fn transactions(&self) -> ApiResult<Value>;

    async fn net_worth(&self) -> ApiResult<Value>;

    async fn health_check(&self) -> ApiResult<Value>;
}
