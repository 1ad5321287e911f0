use dioxus::prelude::*;

use crate::domain::{RiskLevel, RiskReport};

pub fn level_theme(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "border-emerald-500/40 bg-emerald-500/10 text-emerald-200",
        RiskLevel::Moderate => "border-amber-500/40 bg-amber-500/10 text-amber-200",
        RiskLevel::High => "border-orange-500/40 bg-orange-500/10 text-orange-200",
        RiskLevel::Severe => "border-rose-500/40 bg-rose-500/10 text-rose-200",
    }
}

#[component]
pub fn RiskIndicator(report: RiskReport) -> Element {
    let theme = level_theme(report.level);
    let score_display = format!("{:.0}", report.score);
    let probability = format!("{:.0}% likely", report.probability * 100.0);

    rsx! {
        div {
            class: "rounded-xl border px-4 py-3 {theme}",
            div {
                class: "flex items-center justify-between",
                span { class: "text-xs font-semibold uppercase tracking-wide", "Risk score" }
                span { class: "text-xs font-semibold uppercase", "{report.level.label()}" }
            }
            p { class: "mt-2 text-2xl font-semibold", "{score_display}" }
            p { class: "mt-1 text-xs opacity-80",
                "{report.scenario.label()} · {report.severity.label()} · {probability}"
            }
        }
    }
}
