use crate::types::{ChatMessage, Role};
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tokio::sync::watch;

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[hour repr:12 padding:zero]:[minute padding:zero]:[second padding:zero] [period case:upper]"
);

pub fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

/// Answers arrive as pretty-printed JSON; show escaped newlines as real ones.
pub fn display_text(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// Mirror a store's revision counter into a signal so the calling
/// component re-renders whenever the store changes.
pub fn use_revision(subscribe: impl FnOnce() -> watch::Receiver<u64>) -> Signal<u64> {
    let rx = use_hook(subscribe);
    let mut revision = use_signal(|| *rx.borrow());
    use_future(move || {
        let mut rx = rx.clone();
        async move {
            while rx.changed().await.is_ok() {
                let current = *rx.borrow_and_update();
                revision.set(current);
            }
        }
    });
    revision
}

#[component]
pub fn MessageBubble(message: ChatMessage, avatar: &'static str, children: Element) -> Element {
    let role = role_class(message.role);
    rsx! {
        div { class: format_args!("message-row {}", role),
            div { class: format_args!("bubble {}", role),
                div { class: "bubble-body",
                    span { class: format_args!("avatar {}", role),
                        if message.is_user() { "🙂" } else { "{avatar}" }
                    }
                    div { class: "bubble-content",
                        {children}
                        if let Some(ts) = format_message_timestamp(message.created_at) {
                            p { class: "message-timestamp", "{ts}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn TypingIndicator(avatar: &'static str) -> Element {
    rsx! {
        div { class: "message-row assistant",
            div { class: "bubble assistant typing",
                span { class: "avatar assistant", "{avatar}" }
                span { class: "dot" }
                span { class: "dot" }
                span { class: "dot" }
            }
        }
    }
}

#[component]
pub fn Composer(
    placeholder: &'static str,
    busy: bool,
    accent: &'static str,
    on_send: EventHandler<String>,
) -> Element {
    let mut input = use_signal(String::new);

    let mut submit = move || {
        let text = input();
        if text.trim().is_empty() {
            return;
        }
        on_send.call(text);
        input.set(String::new());
    };

    rsx! {
        form {
            class: "composer",
            onsubmit: move |ev| {
                ev.prevent_default();
                submit();
            },
            input {
                r#type: "text",
                placeholder: placeholder,
                value: "{input}",
                disabled: busy,
                oninput: move |ev| input.set(ev.value()),
            }
            button {
                class: format_args!("btn btn-{}", accent),
                r#type: "submit",
                disabled: busy || input().trim().is_empty(),
                "Send"
            }
        }
    }
}
