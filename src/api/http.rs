use super::{ApiError, ApiResult, FinanceBackend};
use crate::config::ClientConfig;
use crate::types::{AiResponse, InsightsResponse, VisualizeResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// REST client for the Prospera API
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    fn get(&self, url: Url) -> RequestBuilder {
        with_credentials(self.client.get(url))
    }

    fn post(&self, url: Url) -> RequestBuilder {
        with_credentials(self.client.post(url))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        classify_status(status, &body)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Opaque payloads: JSON when it parses, otherwise the raw body.
    async fn execute_opaque(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        classify_status(status, &body)?;
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> ApiResult<Client> {
    // Session cookies from /login ride along on every later call
    Ok(Client::builder().cookie_store(true).build()?)
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> ApiResult<Client> {
    Ok(Client::builder().build()?)
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

/// Map a response status to the error taxonomy. 2xx passes through.
pub fn classify_status(status: StatusCode, body: &str) -> ApiResult<()> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    Ok(())
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl FinanceBackend for HttpBackend {
    async fn login(&self, session_id: &str, phone_number: &str) -> ApiResult<Value> {
        let form = [("sessionId", session_id), ("phoneNumber", phone_number)];
        let request = self.post(self.config.endpoint("login")).form(&form);
        self.execute_opaque(request).await
    }

    async fn quick_insights(&self) -> ApiResult<InsightsResponse> {
        self.execute(self.get(self.config.endpoint("quick-insights")))
            .await
    }

    async fn ask_ai(&self, query: &str) -> ApiResult<AiResponse> {
        let request = self
            .post(self.config.endpoint("ask-ai"))
            .json(&QueryRequest { query });
        self.execute(request).await
    }

    async fn visualize(&self, query: &str) -> ApiResult<VisualizeResponse> {
        let request = self
            .post(self.config.endpoint("visualize"))
            .json(&QueryRequest { query });
        self.execute(request).await
    }

    async fn transactions(&self) -> ApiResult<Value> {
        self.execute_opaque(self.get(self.config.endpoint("transactions")))
            .await
    }

    async fn net_worth(&self) -> ApiResult<Value> {
        self.execute_opaque(self.get(self.config.endpoint("net_worth")))
            .await
    }

    async fn health_check(&self) -> ApiResult<Value> {
        self.execute_opaque(self.get(self.config.health_url().clone()))
            .await
    }
}
