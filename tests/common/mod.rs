//! Scripted in-process backend for driving the stores and the transport
//! client without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::oneshot;
use prospera::api::{ApiClient, ApiError, ApiResult, FinanceBackend};
use prospera::session::SessionHandle;
use prospera::types::{
    AiResponse, Analysis, Insight, InsightsResponse, Performance, QuickAction, Session,
    VisualizeResponse,
};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Gate<T> = oneshot::Receiver<ApiResult<T>>;

#[derive(Default)]
pub struct ScriptedBackend {
    login: Mutex<VecDeque<ApiResult<Value>>>,
    insights: Mutex<VecDeque<ApiResult<InsightsResponse>>>,
    ask: Mutex<VecDeque<ApiResult<AiResponse>>>,
    ask_gates: Mutex<HashMap<String, Gate<AiResponse>>>,
    visualize: Mutex<VecDeque<ApiResult<VisualizeResponse>>>,
    aux: Mutex<VecDeque<ApiResult<Value>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_login(&self, result: ApiResult<Value>) {
        self.login.lock().unwrap().push_back(result);
    }

    pub fn push_insights(&self, result: ApiResult<InsightsResponse>) {
        self.insights.lock().unwrap().push_back(result);
    }

    pub fn push_ask(&self, result: ApiResult<AiResponse>) {
        self.ask.lock().unwrap().push_back(result);
    }

    /// The ask-ai call for `query` waits until the returned sender fires.
    pub fn gate_ask(&self, query: &str) -> oneshot::Sender<ApiResult<AiResponse>> {
        let (tx, rx) = oneshot::channel();
        self.ask_gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    pub fn push_visualize(&self, result: ApiResult<VisualizeResponse>) {
        self.visualize.lock().unwrap().push_back(result);
    }

    pub fn push_aux(&self, result: ApiResult<Value>) {
        self.aux.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn exhausted<T>() -> ApiResult<T> {
    Err(ApiError::Status {
        status: 503,
        body: "no scripted reply".to_string(),
    })
}

fn pop<T>(queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
    queue.lock().unwrap().pop_front().unwrap_or_else(exhausted)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl FinanceBackend for ScriptedBackend {
    async fn login(&self, session_id: &str, phone_number: &str) -> ApiResult<Value> {
        self.record(format!("login:{session_id}:{phone_number}"));
        pop(&self.login)
    }

    async fn quick_insights(&self) -> ApiResult<InsightsResponse> {
        self.record("quick_insights".to_string());
        pop(&self.insights)
    }

    async fn ask_ai(&self, query: &str) -> ApiResult<AiResponse> {
        self.record(format!("ask_ai:{query}"));
        let gate = self.ask_gates.lock().unwrap().remove(query);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| exhausted()),
            None => pop(&self.ask),
        }
    }

    async fn visualize(&self, query: &str) -> ApiResult<VisualizeResponse> {
        self.record(format!("visualize:{query}"));
        pop(&self.visualize)
    }

    async fn transactions(&self) -> ApiResult<Value> {
        self.record("transactions".to_string());
        pop(&self.aux)
    }

    async fn net_worth(&self) -> ApiResult<Value> {
        self.record("net_worth".to_string());
        pop(&self.aux)
    }

    async fn health_check(&self) -> ApiResult<Value> {
        self.record("health_check".to_string());
        pop(&self.aux)
    }
}

pub fn client(backend: &Arc<ScriptedBackend>) -> ApiClient {
    ApiClient::new(backend.clone(), SessionHandle::new())
}

/// Client whose session is already established.
pub fn signed_in_client(backend: &Arc<ScriptedBackend>) -> ApiClient {
    let api = client(backend);
    api.session().establish(Session {
        session_id: "9999999999".to_string(),
        phone_number: "9999999999".to_string(),
    });
    api
}

pub fn ai_reply(query: &str, response: Value) -> AiResponse {
    AiResponse {
        query: query.to_string(),
        response,
        analysis: Analysis {
            intent: "general".to_string(),
            data_sources_used: vec!["bank_transactions".to_string()],
            time_period: None,
            specific_focus: None,
        },
        performance: Performance {
            apis_called: 1,
            selective_fetching: true,
            response_optimized: true,
        },
        timestamp: "2024-08-01T10:00:00".to_string(),
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "internal error".to_string(),
    }
}

pub fn insights(actions: &[(&str, &str)]) -> InsightsResponse {
    InsightsResponse {
        insights: vec![Insight {
            kind: "monthly_spend".to_string(),
            title: "Monthly Spend".to_string(),
            value: "₹42,300".to_string(),
            subtitle: Some("July 2024".to_string()),
        }],
        quick_actions: actions
            .iter()
            .map(|(label, query)| QuickAction {
                label: label.to_string(),
                query: query.to_string(),
            })
            .collect(),
        timestamp: "2024-08-01T10:00:00".to_string(),
    }
}

pub fn pie_chart() -> Value {
    json!({
        "chartType": "PieChart",
        "data": [["Category", "Amount"], ["Food", 4200.0], ["Travel", 1800.0]],
        "options": { "title": "Spending by Category (Last Month)", "is3D": true }
    })
}
