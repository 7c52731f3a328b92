//! Visualization store: a chat log whose assistant replies may carry a chart.

use crate::api::ApiClient;
use crate::store::{InFlight, LogEntry, MessageLog};
use crate::types::{ChartSpec, ChatMessage, Role, VisualizeResponse};
use tokio::sync::watch;

pub const CHART_READY_TEXT: &str = "Here is the visualization you requested:";
pub const CHART_ERROR_TEXT: &str =
    "Sorry, I encountered an error generating the chart. Please try again.";

pub const SUGGESTED_CHART_QUERIES: &[(&str, &str)] = &[
    (
        "Show spending trend (last 6 months)",
        "Show my spending trend for the last 6 months",
    ),
    ("Show spending by category", "Show spending by category"),
    (
        "Show investment portfolio",
        "Show my investment portfolio allocation",
    ),
];

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizationMessage {
    pub message: ChatMessage,
    /// Present only when the backend returned a chart without an error.
    pub chart: Option<ChartSpec>,
}

impl LogEntry for VisualizationMessage {}

#[derive(Clone)]
pub struct VisualizationService {
    api: ApiClient,
    log: MessageLog<VisualizationMessage>,
}

impl VisualizationService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            log: MessageLog::new(),
        }
    }

    pub fn messages(&self) -> Vec<VisualizationMessage> {
        self.log.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.log.is_busy()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.log.subscribe()
    }

    pub fn begin(&self, query: &str) -> Option<PendingChart> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.log
            .append_with(Role::User, query.to_string(), |message| {
                VisualizationMessage {
                    message,
                    chart: None,
                }
            });
        let in_flight = self.log.start_request();
        Some(PendingChart {
            api: self.api.clone(),
            log: self.log.clone(),
            query: query.to_string(),
            in_flight,
        })
    }

    pub async fn send(&self, query: &str) {
        if let Some(pending) = self.begin(query) {
            pending.resolve().await;
        }
    }
}

impl PartialEq for VisualizationService {
    fn eq(&self, other: &Self) -> bool {
        self.log.ptr_eq(&other.log)
    }
}

pub struct PendingChart {
    api: ApiClient,
    log: MessageLog<VisualizationMessage>,
    query: String,
    in_flight: InFlight<VisualizationMessage>,
}

impl PendingChart {
    pub async fn resolve(self) {
        let (text, chart) = match self.api.visualize(&self.query).await {
            Ok(VisualizeResponse::Chart(spec)) => (CHART_READY_TEXT.to_string(), Some(spec)),
            Ok(VisualizeResponse::Error(reason)) => (chart_failure_text(&reason), None),
            Err(err) => {
                tracing::error!(error = %err, "error generating chart");
                (CHART_ERROR_TEXT.to_string(), None)
            }
        };
        self.log
            .append_with(Role::Assistant, text, |message| VisualizationMessage {
                message,
                chart,
            });
        self.in_flight.release();
    }
}

pub fn chart_failure_text(reason: &str) -> String {
    format!("I couldn't generate that chart: {reason}")
}
