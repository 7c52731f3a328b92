use crate::api::ApiResult;
use crate::types::{Insight, InsightsResponse, QuickAction};

pub const DASHBOARD_ERROR_TEXT: &str = "Failed to load financial insights";

/// `Loading -> {Ready, Failed}`; a refresh from any state goes back to `Loading`.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Ready(InsightsResponse),
    Failed(String),
}

impl DashboardState {
    pub fn begin_refresh(&mut self) {
        *self = DashboardState::Loading;
    }

    /// Apply a fetch result. A success replaces the previous snapshot wholesale.
    pub fn settle(&mut self, result: ApiResult<InsightsResponse>) {
        *self = match result {
            Ok(snapshot) => DashboardState::Ready(snapshot),
            Err(err) => {
                tracing::error!(error = %err, "error fetching insights");
                DashboardState::Failed(DASHBOARD_ERROR_TEXT.to_string())
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }

    pub fn insights(&self) -> &[Insight] {
        match self {
            DashboardState::Ready(snapshot) => &snapshot.insights,
            _ => &[],
        }
    }

    pub fn quick_actions(&self) -> &[QuickAction] {
        match self {
            DashboardState::Ready(snapshot) => &snapshot.quick_actions,
            _ => &[],
        }
    }
}

/// Dashboard state plus a fetch generation.
///
/// Each refresh gets a new generation. A fetch that settles after a newer one
/// was started is dropped, so a slow older response never replaces the
/// snapshot of a later refresh.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Dashboard {
    state: DashboardState,
    generation: u64,
}

impl Dashboard {
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Back to `Loading`; returns the generation the caller settles with.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.state.begin_refresh();
        self.generation
    }

    /// Returns `false` when `generation` was superseded and the result ignored.
    pub fn settle(&mut self, generation: u64, result: ApiResult<InsightsResponse>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale insights");
            return false;
        }
        self.state.settle(result);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightIcon {
    Dollar,
    CreditCard,
    TrendingUp,
    Target,
    Calendar,
    BarChart,
}

impl InsightIcon {
    pub fn for_kind(kind: &str) -> Self {
        match kind {
            "net_worth" => InsightIcon::Dollar,
            "monthly_spend" => InsightIcon::CreditCard,
            "credit_score" => InsightIcon::TrendingUp,
            "goal_progress" => InsightIcon::Target,
            "next_payment" => InsightIcon::Calendar,
            "top_category" => InsightIcon::BarChart,
            _ => InsightIcon::Dollar,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            InsightIcon::Dollar => "💰",
            InsightIcon::CreditCard => "💳",
            InsightIcon::TrendingUp => "📈",
            InsightIcon::Target => "🎯",
            InsightIcon::Calendar => "📅",
            InsightIcon::BarChart => "📊",
        }
    }
}
