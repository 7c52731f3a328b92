use crate::api::ApiClient;
use crate::auth::{DEMO_CREDENTIAL, LoginForm};
use dioxus::prelude::*;

/// Login form. On success the session handle flips and the shell takes over.
#[component]
pub fn AuthView(api: ApiClient) -> Element {
    let mut session_id = use_signal(String::new);
    let mut phone_number = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let on_submit = move |ev: FormEvent| {
        ev.prevent_default();
        let form = LoginForm {
            session_id: session_id(),
            phone_number: phone_number(),
        };
        let api = api.clone();
        loading.set(true);
        error.set(None);
        spawn(async move {
            if let Err(err) = form.submit(&api).await {
                error.set(Some(err.to_string()));
            }
            loading.set(false);
        });
    };

    let placeholder = format!("{DEMO_CREDENTIAL} (demo)");

    rsx! {
        div { class: "auth-screen",
            div { class: "auth-card",
                div { class: "auth-heading",
                    h1 { "Prospera" }
                    p { class: "text-muted", "Your AI-Powered Financial Assistant" }
                }
                form { class: "auth-form", onsubmit: on_submit,
                    label { r#for: "sessionId", "Session ID" }
                    input {
                        id: "sessionId",
                        r#type: "text",
                        value: "{session_id}",
                        placeholder: "{placeholder}",
                        oninput: move |ev| session_id.set(ev.value()),
                    }
                    label { r#for: "phoneNumber", "Phone Number" }
                    input {
                        id: "phoneNumber",
                        r#type: "text",
                        value: "{phone_number}",
                        placeholder: "{placeholder}",
                        oninput: move |ev| phone_number.set(ev.value()),
                    }
                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing In..." } else { "Sign In" }
                    }
                }
                p { class: "auth-hint text-muted", "Demo credentials: Use {DEMO_CREDENTIAL} for both fields" }
            }
        }
    }
}
