use crate::api::ApiClient;
use crate::views::chart::ChartView;
use crate::views::shared::{Composer, MessageBubble, TypingIndicator, use_revision};
use crate::visualization::{SUGGESTED_CHART_QUERIES, VisualizationService};
use dioxus::prelude::*;

const CHART_AVATAR: &str = "📊";

#[component]
pub fn VisualizationView(api: ApiClient) -> Element {
    // Local to this view: leaving the tab discards the chart history
    let service = use_hook(|| VisualizationService::new(api.clone()));
    let revision = use_revision(|| service.subscribe());

    let send = use_callback({
        let service = service.clone();
        move |query: String| {
            if let Some(pending) = service.begin(&query) {
                spawn_forever(pending.resolve());
            }
        }
    });

    let _ = revision();
    let messages = service.messages();
    let busy = service.is_busy();

    rsx! {
        div { class: "chat-wrap",
            div { class: "panel-header",
                h2 { "{CHART_AVATAR} Data Visualization" }
                p { class: "text-muted", "Ask for charts about your spending, investments, or trends" }
            }
            div { class: "chat-list",
                if messages.is_empty() && !busy {
                    div { class: "empty-state",
                        p { "Visualize your financial data instantly!" }
                        for (label, query) in SUGGESTED_CHART_QUERIES.iter().copied() {
                            button {
                                class: "suggestion suggestion-accent",
                                r#type: "button",
                                onclick: move |_| send.call(query.to_string()),
                                "{label}"
                            }
                        }
                    }
                }
                for entry in messages {
                    div { key: "{entry.message.id}", class: "viz-entry",
                        MessageBubble {
                            message: entry.message.clone(),
                            avatar: CHART_AVATAR,
                            p { class: "message-text", "{entry.message.text}" }
                        }
                        if let Some(spec) = entry.chart.clone() {
                            div { class: "chart-slot",
                                ChartView { spec }
                            }
                        }
                    }
                }
                if busy {
                    TypingIndicator { avatar: CHART_AVATAR }
                }
            }
            Composer {
                placeholder: "Ask for a chart (e.g., 'spending trend')...",
                busy,
                accent: "accent",
                on_send: move |query: String| send.call(query),
            }
        }
    }
}
