use dioxus::prelude::*;

#[component]
pub fn AlertModal(message: String, on_close: Callback<()>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "alertdialog",
                p { class: "modal-message", "{message}" }
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    onclick: move |_| on_close.call(()),
                    "OK"
                }
            }
        }
    }
}
