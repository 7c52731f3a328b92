use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub created_at: OffsetDateTime,
}

impl ChatMessage {
    pub fn is_user(&self) -> bool {
        matches!(self.role, Role::User)
    }
}

/// Identifier pair confirmed by login. Lives only in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub intent: String,
    #[serde(default)]
    pub data_sources_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_focus: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub apis_called: u32,
    pub selective_fetching: bool,
    pub response_optimized: bool,
}

/// Reply of `/ask-ai`. `response` is passed through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub query: String,
    pub response: Value,
    pub analysis: Analysis,
    pub performance: Performance,
    #[serde(default)]
    pub timestamp: String,
}

/// Chart-type tag plus tabular data and an opaque options blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "chartType", default)]
    pub chart_type: String,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub options: Value,
}

/// Reply of `/visualize`: either a chart or an explicit domain error.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualizeResponse {
    Chart(ChartSpec),
    Error(String),
}

impl<'de> Deserialize<'de> for VisualizeResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawVisualizeResponse {
            #[serde(default)]
            error: Option<String>,
            #[serde(flatten)]
            chart: ChartSpec,
        }

        let raw = RawVisualizeResponse::deserialize(deserializer)?;
        match raw.error {
            Some(error) if !error.is_empty() => Ok(Self::Error(error)),
            _ => Ok(Self::Chart(raw.chart)),
        }
    }
}
