use dioxus::prelude::*;

use crate::{
    domain::{classify, Classification, MatchKind},
    ui::{components::confidence_badge::ConfidenceBadge, theme},
};

const EXAMPLES: &[&str] = &[
    "laptop",
    "organic cotton t-shirt",
    "roasted coffee beans",
    "lithium battery pack",
    "carbon fibre drone",
];
const HISTORY_LIMIT: usize = 8;

#[component]
pub fn ClassifierPage() -> Element {
    let mut query = use_signal(String::new);
    let mut result = use_signal(|| None::<(String, Classification)>);
    let mut history = use_signal(Vec::<(String, Classification)>::new);

    let mut run = move |text: String| {
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }
        let classification = classify(&text);
        tracing::debug!(
            query = %text,
            hs_code = %classification.hs_code,
            match_kind = ?classification.match_kind,
            "classified product"
        );
        history.with_mut(|entries| {
            entries.retain(|(previous, _)| previous != &text);
            entries.insert(0, (text.clone(), classification.clone()));
            entries.truncate(HISTORY_LIMIT);
        });
        result.set(Some((text, classification)));
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "HS code lookup" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Describe the product in plain words. Material and use improve the match."
                }
                form {
                    class: "mt-4 flex flex-col gap-3 sm:flex-row",
                    onsubmit: move |evt| {
                        evt.prevent_default();
                        run(query());
                    },
                    input {
                        class: "{theme::INPUT} sm:mt-0",
                        placeholder: "e.g. stainless steel pipe",
                        value: query(),
                        oninput: move |evt| query.set(evt.value()),
                    }
                    button { class: "{theme::BUTTON_PRIMARY}", r#type: "submit", disabled: query().trim().is_empty(), "Classify" }
                }
                div { class: "mt-3 flex flex-wrap gap-2",
                    for example in EXAMPLES {
                        button {
                            class: theme::toggle_button(false),
                            onclick: move |_| {
                                query.set(example.to_string());
                                run(example.to_string());
                            },
                            "{example}"
                        }
                    }
                }
            }

            if let Some((text, classification)) = result() {
                ClassificationCard { query: text, classification }
            }

            if !history().is_empty() {
                section { class: "{theme::PANEL}",
                    h2 { class: "{theme::PANEL_TITLE}", "Recent lookups" }
                    ul { class: "mt-3 space-y-2 text-sm",
                        for (text, classification) in history() {
                            li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                                span { class: "text-slate-300", "{text}" }
                                span { class: "font-mono text-xs {theme::TEXT_ACCENT}", "{classification.hs_code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ClassificationCard(query: String, classification: Classification) -> Element {
    let match_text = match_label(&classification);
    let duty = format!("{:.1}%", classification.duty_rate * 100.0);
    let review = classification.needs_review();

    rsx! {
        section { class: "{theme::PANEL} space-y-4",
            div { class: "flex flex-wrap items-start justify-between gap-4",
                div {
                    p { class: "{theme::LABEL}", "Result for “{query}”" }
                    p { class: "mt-1 font-mono text-3xl font-semibold {theme::TEXT_ACCENT}", "{classification.hs_code}" }
                    p { class: "mt-1 text-sm text-slate-300", "{classification.description}" }
                }
                ConfidenceBadge { value: classification.confidence }
            }
            div { class: "grid gap-4 sm:grid-cols-3 text-sm",
                div {
                    p { class: "{theme::LABEL}", "Category" }
                    p { class: "mt-1 text-slate-200", "{classification.category}" }
                }
                div {
                    p { class: "{theme::LABEL}", "Duty rate" }
                    p { class: "mt-1 text-slate-200", "{duty}" }
                }
                div {
                    p { class: "{theme::LABEL}", "Match" }
                    p { class: "mt-1 text-slate-200", "{match_text}" }
                }
            }
            p { class: "text-xs {theme::TEXT_MUTED}", "{classification.notes}" }
            if review {
                p { class: "rounded-lg border border-amber-500/40 bg-amber-500/10 px-3 py-2 text-xs text-amber-200",
                    "No confident match. Have a licensed customs broker confirm this classification before filing."
                }
            }
        }
    }
}

fn match_label(classification: &Classification) -> String {
    match (classification.match_kind, classification.matched_key.as_deref()) {
        (MatchKind::Exact, Some(key)) => format!("Exact (“{key}”)"),
        (MatchKind::Fuzzy, Some(key)) => format!("Keyword (“{key}”)"),
        (MatchKind::Exact | MatchKind::Fuzzy, None) => "Dictionary".to_string(),
        (MatchKind::Unknown, _) => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_labels() {
        assert_eq!(match_label(&classify("laptop")), "Exact (“laptop”)");
        assert!(match_label(&classify("gaming laptop computer")).starts_with("Keyword"));
        assert_eq!(match_label(&classify("zzzz-nonexistent-product")), "None");
    }
}
