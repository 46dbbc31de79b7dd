use dioxus::prelude::*;
use quiz_core::model::UserName;
use services::IdentityError;

use crate::context::AppContext;
use crate::views::ViewError;

#[component]
pub fn LoginView(on_login: Callback<UserName>) -> Element {
    let ctx = use_context::<AppContext>();
    let identity = ctx.identity();
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let submit = use_callback(move |()| {
        let identity = identity.clone();
        let raw = name.read().clone();
        spawn(async move {
            match identity.login(&raw).await {
                Ok(user) => on_login.call(user),
                Err(IdentityError::InvalidName(_)) => error.set(Some(ViewError::EmptyName)),
                Err(err) => {
                    tracing::error!(error = %err, "login failed");
                    error.set(Some(ViewError::Unknown));
                }
            }
        });
    });

    rsx! {
        div { class: "page login",
            h2 { "Welcome to the Quiz" }
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    submit.call(());
                },
                label { r#for: "username", "Enter your username:" }
                input {
                    id: "username",
                    r#type: "text",
                    value: "{name}",
                    oninput: move |evt| {
                        name.set(evt.value());
                        error.set(None);
                    },
                }
                if let Some(err) = error() {
                    p { class: "form-error", "{err.message()}" }
                }
                button { r#type: "submit", class: "btn btn-primary", "Start" }
            }
        }
    }
}
