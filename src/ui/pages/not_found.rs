use dioxus::prelude::*;

use crate::{app::Route, ui::theme};

#[component]
pub fn NotFoundPage(path: String) -> Element {
    let nav = use_navigator();
    tracing::debug!(%path, "no route matched");

    rsx! {
        div { class: "mx-auto max-w-lg space-y-4 py-16 text-center",
            p { class: "text-5xl font-semibold {theme::TEXT_ACCENT}", "404" }
            h2 { class: "text-xl font-semibold text-slate-100", "Page not found" }
            p { class: "text-sm {theme::TEXT_MUTED}", "Nothing lives at {path}." }
            button { class: "{theme::BUTTON_PRIMARY}", onclick: move |_| { nav.push(Route::Home {}); }, "Back to home" }
        }
    }
}
