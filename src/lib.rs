pub mod api;
pub mod auth;
pub mod chart;
pub mod config;
pub mod conversation;
pub mod dashboard;
pub mod session;
pub mod store;
pub mod types;
pub mod visualization;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
