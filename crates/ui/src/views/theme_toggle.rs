use dioxus::prelude::*;
use quiz_core::model::Theme;

use crate::context::AppContext;

#[component]
pub fn ThemeToggle(theme: Signal<Theme>) -> Element {
    let ctx = use_context::<AppContext>();
    let service = ctx.theme();

    let toggle = use_callback(move |()| {
        let service = service.clone();
        let mut theme = theme;
        spawn(async move {
            match service.toggle().await {
                Ok(next) => theme.set(next),
                Err(err) => tracing::warn!(error = %err, "could not persist theme"),
            }
        });
    });

    let label = if theme().is_dark() { "Light mode" } else { "Dark mode" };

    rsx! {
        button {
            r#type: "button",
            class: "theme-toggle",
            title: "{label}",
            onclick: move |_| toggle.call(()),
            "{label}"
        }
    }
}
