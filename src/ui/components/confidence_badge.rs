use dioxus::prelude::*;

/// Label and colour classes for a 0..=1 confidence value.
pub fn confidence_tier(value: f64) -> (&'static str, &'static str) {
    match value {
        v if v >= 0.8 => (
            "High",
            "bg-emerald-500/10 text-emerald-300 border-emerald-500/40",
        ),
        v if v >= 0.6 => (
            "Medium",
            "bg-amber-500/10 text-amber-300 border-amber-500/40",
        ),
        v if v > 0.0 => (
            "Needs review",
            "bg-rose-500/10 text-rose-300 border-rose-500/40",
        ),
        _ => ("N/A", "bg-slate-700/40 text-slate-300 border-slate-600/60"),
    }
}

#[component]
pub fn ConfidenceBadge(value: f64) -> Element {
    let (label, color) = confidence_tier(value);
    let pct = (value.clamp(0.0, 1.0) * 100.0).round();

    rsx! {
        span {
            class: "inline-flex items-center gap-1 rounded-full border px-2 py-0.5 text-xs font-medium {color}",
            "{label}"
            span { class: "opacity-70", "{pct}%" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers() {
        assert_eq!(confidence_tier(0.95).0, "High");
        assert_eq!(confidence_tier(0.72).0, "Medium");
        assert_eq!(confidence_tier(0.45).0, "Needs review");
        assert_eq!(confidence_tier(0.0).0, "N/A");
    }
}
