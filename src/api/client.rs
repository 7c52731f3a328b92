use super::{ApiError, ApiResult, FinanceBackend, HttpBackend};
use crate::config::ClientConfig;
use crate::session::SessionHandle;
use crate::types::{AiResponse, InsightsResponse, VisualizeResponse};
use serde_json::Value;
use std::sync::Arc;

/// Handle the views talk to.
///
/// Every response passes through [`ApiClient::intercept`]: a 401 from any
/// call clears the session, forcing the user back to the login form. All
/// other errors are returned untouched for the call site to handle.
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn FinanceBackend>,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(backend: Arc<dyn FinanceBackend>, session: SessionHandle) -> Self {
        Self { backend, session }
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let backend = HttpBackend::new(config.clone())?;
        Ok(Self::new(Arc::new(backend), SessionHandle::new()))
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn intercept<T>(&self, operation: &'static str, result: ApiResult<T>) -> ApiResult<T> {
        match &result {
            Err(ApiError::Unauthorized) => {
                tracing::warn!(operation, "backend returned 401; resetting session");
                self.session.clear();
            }
            Err(err) => tracing::debug!(operation, error = %err, "request failed"),
            Ok(_) => tracing::debug!(operation, "request succeeded"),
        }
        result
    }

    /// Confirm a session. Every failure collapses into [`ApiError::LoginFailed`].
    pub async fn login(&self, session_id: &str, phone_number: &str) -> ApiResult<Value> {
        let result = self.backend.login(session_id, phone_number).await;
        self.intercept("login", result).map_err(|err| {
            tracing::error!(error = %err, "login error");
            ApiError::LoginFailed
        })
    }

    pub async fn quick_insights(&self) -> ApiResult<InsightsResponse> {
        let result = self.backend.quick_insights().await;
        self.intercept("quick_insights", result)
    }

    pub async fn ask_ai(&self, query: &str) -> ApiResult<AiResponse> {
        let result = self.backend.ask_ai(query).await;
        self.intercept("ask_ai", result)
    }

    pub async fn visualize(&self, query: &str) -> ApiResult<VisualizeResponse> {
        let result = self.backend.visualize(query).await;
        self.intercept("visualize", result)
    }

    pub async fn transactions(&self) -> ApiResult<Value> {
        let result = self.backend.transactions().await;
        self.intercept("transactions", result)
    }

    pub async fn net_worth(&self) -> ApiResult<Value> {
        let result = self.backend.net_worth().await;
        self.intercept("net_worth", result)
    }

    pub async fn health_check(&self) -> ApiResult<Value> {
        let result = self.backend.health_check().await;
        self.intercept("health_check", result)
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend) && self.session == other.session
    }
}
