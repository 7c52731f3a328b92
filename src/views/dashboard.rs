use crate::api::ApiClient;
use crate::dashboard::{Dashboard, DashboardState, InsightIcon};
use crate::types::{Insight, InsightsResponse};
use dioxus::prelude::*;

#[component]
pub fn DashboardView(api: ApiClient, on_quick_action: EventHandler<String>) -> Element {
    let mut dashboard = use_signal(Dashboard::default);

    let refresh = use_callback(move |_: ()| {
        let api = api.clone();
        let generation = dashboard.write().begin_refresh();
        spawn(async move {
            let result = api.quick_insights().await;
            dashboard.write().settle(generation, result);
        });
    });

    use_effect(move || refresh.call(()));

    let current = dashboard.read().state().clone();
    match current {
        DashboardState::Loading => rsx! {
            div { class: "dashboard",
                div { class: "skeleton skeleton-title" }
                div { class: "insight-grid",
                    for i in 0..3 {
                        div { key: "{i}", class: "skeleton skeleton-card" }
                    }
                }
            }
        },
        DashboardState::Failed(message) => rsx! {
            div { class: "dashboard",
                div { class: "error-banner",
                    p { "{message}" }
                    button {
                        class: "link-btn",
                        r#type: "button",
                        onclick: move |_| refresh.call(()),
                        "Try again"
                    }
                }
            }
        },
        DashboardState::Ready(snapshot) => rsx! {
            Overview {
                snapshot,
                on_quick_action,
                on_refresh: move |_| refresh.call(()),
            }
        },
    }
}

#[component]
fn Overview(
    snapshot: InsightsResponse,
    on_quick_action: EventHandler<String>,
    on_refresh: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "dashboard",
            div { class: "panel-header",
                h2 { "Financial Overview" }
                p { class: "text-muted", "Your latest financial insights" }
            }
            div { class: "insight-grid",
                for (i, insight) in snapshot.insights.iter().enumerate() {
                    InsightCard { key: "{i}", insight: insight.clone() }
                }
            }
            div { class: "quick-actions",
                h3 { class: "section-title", "Quick Actions" }
                div { class: "quick-action-grid",
                    for (i, action) in snapshot.quick_actions.iter().enumerate() {
                        button {
                            key: "{i}",
                            class: "quick-action",
                            r#type: "button",
                            onclick: {
                                let query = action.query.clone();
                                move |_| on_quick_action.call(query.clone())
                            },
                            "{action.label}"
                        }
                    }
                }
            }
            div { class: "dashboard-footer",
                button {
                    class: "link-btn",
                    r#type: "button",
                    onclick: move |_| on_refresh.call(()),
                    "Refresh Data"
                }
            }
        }
    }
}

#[component]
fn InsightCard(insight: Insight) -> Element {
    let icon = InsightIcon::for_kind(&insight.kind);
    rsx! {
        div { class: "insight-card",
            span { class: "insight-icon", "{icon.glyph()}" }
            div { class: "insight-body",
                h3 { class: "insight-title", "{insight.title}" }
                p { class: "insight-value", "{insight.value}" }
                if let Some(subtitle) = insight.subtitle.clone() {
                    p { class: "insight-subtitle", "{subtitle}" }
                }
            }
        }
    }
}
