use crate::api::ApiClient;
use crate::config::client_config;
use crate::conversation::ConversationService;
use crate::types::Session;
use crate::views::{AuthView, ChatView, DashboardView, VisualizationView};
use dioxus::prelude::*;

const PROSPERA_CSS: Asset = asset!("/assets/prospera.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Dashboard,
    Chat,
    Visualization,
}

#[component]
pub fn App() -> Element {
    let api = use_hook(|| ApiClient::from_config(&client_config()).map_err(|err| err.to_string()));
    let session = use_signal(|| Option::<Session>::None);

    let body = match api {
        Ok(api) => {
            use_session_sync(&api, session);
            match session() {
                Some(current) => rsx! { Shell { api, session: current } },
                None => rsx! { AuthView { api } },
            }
        }
        Err(message) => {
            tracing::error!(error = %message, "failed to build API client");
            rsx! {
                div { class: "auth-screen",
                    div { class: "error-banner", "Could not start Prospera: {message}" }
                }
            }
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: PROSPERA_CSS }
        {body}
    }
}

/// Follow the session handle. A cleared session (logout or any 401)
/// unmounts the shell and every store that lived in it.
fn use_session_sync(api: &ApiClient, mut session: Signal<Option<Session>>) {
    let handle = api.session().clone();
    use_future(move || {
        let mut rx = handle.subscribe();
        async move {
            loop {
                let current = rx.borrow_and_update().clone();
                session.set(current);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });
}

#[component]
fn Shell(api: ApiClient, session: Session) -> Element {
    let conversation = use_hook(|| ConversationService::new(api.clone()));
    let mut active_tab = use_signal(|| AppTab::Dashboard);

    let on_quick_action = {
        let conversation = conversation.clone();
        move |query: String| {
            conversation.set_pending_query(query);
            active_tab.set(AppTab::Chat);
        }
    };

    let panel = match active_tab() {
        AppTab::Dashboard => rsx! {
            DashboardView { api: api.clone(), on_quick_action }
        },
        AppTab::Chat => rsx! {
            ChatView { conversation: conversation.clone() }
        },
        AppTab::Visualization => rsx! {
            VisualizationView { api: api.clone() }
        },
    };

    rsx! {
        AppHeader { api: api.clone(), active_tab, session_id: session.session_id.clone() }
        main { class: "main-container", {panel} }
    }
}

#[component]
fn AppHeader(api: ApiClient, active_tab: Signal<AppTab>, session_id: String) -> Element {
    let health = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.health_check().await.is_ok() }
        }
    });
    let (health_class, health_label) = match *health.read() {
        Some(true) => ("health online", "Backend online"),
        Some(false) => ("health offline", "Backend unreachable"),
        None => ("health", "Checking backend…"),
    };

    rsx! {
        div { class: "header",
            div { class: "header-content",
                div { class: "brand",
                    h1 { "Prospera" }
                    span { class: "text-muted", "AI Financial Assistant" }
                }
                TabNavigation { active_tab }
                div { class: "user-menu",
                    span { class: "{health_class}", title: "{health_label}" }
                    span { class: "session-label", "Session: {session_id}" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        title: "Log out",
                        onclick: move |_| api.session().clear(),
                        "Log out"
                    }
                }
            }
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        nav { class: "tabs",
            TabButton { active_tab, tab: AppTab::Dashboard, label: "Dashboard" }
            TabButton { active_tab, tab: AppTab::Chat, label: "Chat" }
            TabButton { active_tab, tab: AppTab::Visualization, label: "Visualization" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab { "tab active" } else { "tab" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}
