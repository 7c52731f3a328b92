use crate::conversation::ConversationService;
use crate::views::shared::{Composer, MessageBubble, TypingIndicator, display_text, use_revision};
use dioxus::prelude::*;

const ASSISTANT_AVATAR: &str = "🤖";

const SUGGESTED_QUESTIONS: &[&str] = &[
    "What's my current financial status?",
    "How can I improve my savings?",
];

/// Start a send and let it finish even if this view unmounts meanwhile.
fn dispatch_send(conversation: &ConversationService, query: &str) {
    if let Some(pending) = conversation.begin(query) {
        spawn_forever(pending.resolve());
    }
}

#[component]
pub fn ChatView(conversation: ConversationService) -> Element {
    let revision = use_revision(|| conversation.subscribe());

    // A quick action picked on the dashboard is sent once, on mount
    use_hook({
        let conversation = conversation.clone();
        move || {
            if let Some(query) = conversation.take_pending_query() {
                dispatch_send(&conversation, &query);
            }
        }
    });

    let send = use_callback({
        let conversation = conversation.clone();
        move |query: String| dispatch_send(&conversation, &query)
    });

    let _ = revision();
    let messages = conversation.messages();
    let busy = conversation.is_busy();

    rsx! {
        div { class: "chat-wrap",
            div { class: "panel-header",
                h2 { "{ASSISTANT_AVATAR} AI Financial Assistant" }
                p { class: "text-muted", "Ask me anything about your finances" }
            }
            div { class: "chat-list",
                if messages.is_empty() && !busy {
                    div { class: "empty-state",
                        p { "Start a conversation by asking about your finances!" }
                        for suggestion in SUGGESTED_QUESTIONS.iter().copied() {
                            button {
                                class: "suggestion",
                                r#type: "button",
                                onclick: move |_| send.call(suggestion.to_string()),
                                "{suggestion}"
                            }
                        }
                    }
                }
                for message in messages {
                    MessageBubble {
                        key: "{message.id}",
                        message: message.clone(),
                        avatar: ASSISTANT_AVATAR,
                        pre { class: "message-text",
                            code { "{display_text(&message.text)}" }
                        }
                        if !message.is_user() {
                            CopyButton { text: message.text.clone() }
                        }
                    }
                }
                if busy {
                    TypingIndicator { avatar: ASSISTANT_AVATAR }
                }
            }
            Composer {
                placeholder: "Ask about your finances...",
                busy,
                accent: "primary",
                on_send: move |query: String| send.call(query),
            }
        }
    }
}

#[component]
fn CopyButton(text: String) -> Element {
    let on_copy = move |_| {
        let raw = text.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            {
                tracing::debug!(len = raw.len(), "clipboard unavailable on this platform");
            }
        });
    };

    rsx! {
        div { class: "actions",
            button { class: "action-btn", title: "Copy answer", onclick: on_copy, "Copy" }
        }
    }
}
