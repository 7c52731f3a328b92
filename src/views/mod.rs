pub mod auth;
pub mod chart;
pub mod chat;
pub mod dashboard;
pub mod shared;
pub mod visualization;

pub use auth::AuthView;
pub use chart::ChartView;
pub use chat::ChatView;
pub use dashboard::DashboardView;
pub use visualization::VisualizationView;
