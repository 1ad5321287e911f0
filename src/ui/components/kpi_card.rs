use dioxus::prelude::*;

use crate::ui::theme;

#[component]
pub fn KpiCard(
    title: String,
    value: String,
    description: Option<String>,
    #[props(default)] highlight: bool,
) -> Element {
    let border = if highlight {
        "border-teal-500/50 bg-teal-500/5"
    } else {
        "border-slate-800 bg-slate-900/40"
    };
    rsx! {
        div {
            class: "rounded-xl border {border} p-4 shadow-sm",
            h3 { class: "{theme::LABEL}", "{title}" }
            p { class: "mt-2 text-2xl font-semibold text-slate-100", "{value}" }
            if let Some(desc) = description {
                p { class: "mt-1 text-xs {theme::TEXT_MUTED}", "{desc}" }
            }
        }
    }
}
