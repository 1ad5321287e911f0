use dioxus::prelude::*;

use crate::{
    domain::{
        compliance::{answer, ComplianceAnswer, Topic},
        screen, ScreeningRequest, ScreeningResult, ScreeningStatus,
    },
    ui::{components::confidence_badge::ConfidenceBadge, theme},
};

const SUGGESTED: &[&str] = &[
    "What does FOB mean under Incoterms?",
    "Do I need a certificate of origin for CUSMA?",
    "What is the de minimis threshold for Canada?",
    "When is an ISF filing due?",
];
const THREAD_LIMIT: usize = 10;

#[derive(Clone, PartialEq)]
struct Exchange {
    question: String,
    reply: ComplianceAnswer,
}

#[component]
pub fn CompliancePage() -> Element {
    rsx! {
        div { class: "space-y-8",
            ComplianceAssistant {}
            PartyScreening {}
        }
    }
}

#[component]
fn ComplianceAssistant() -> Element {
    let mut question = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut thread = use_signal(Vec::<Exchange>::new);

    let mut ask = move |text: String| match answer(&text) {
        Ok(reply) => {
            tracing::debug!(topic = ?reply.topic, confidence = reply.confidence, "answered compliance question");
            thread.with_mut(|entries| {
                entries.insert(0, Exchange { question: text.trim().to_string(), reply });
                entries.truncate(THREAD_LIMIT);
            });
            question.set(String::new());
            error.set(None);
        }
        Err(err) => error.set(Some(format!("Cannot answer: {err}."))),
    };

    rsx! {
        section { class: "{theme::PANEL}",
            h2 { class: "{theme::PANEL_TITLE}", "Compliance assistant" }
            p { class: "mt-2 text-sm text-slate-400",
                "General guidance only. Confirm binding decisions with a licensed customs broker."
            }
            form {
                class: "mt-4 flex flex-col gap-3 sm:flex-row",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    ask(question());
                },
                input {
                    class: "{theme::INPUT} sm:mt-0",
                    placeholder: "Ask about Incoterms, origin rules, bonds…",
                    value: question(),
                    oninput: move |evt| question.set(evt.value()),
                }
                button { class: "{theme::BUTTON_PRIMARY}", r#type: "submit", "Ask" }
            }
            if let Some(message) = error() {
                p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
            }
            div { class: "mt-3 flex flex-wrap gap-2",
                for suggestion in SUGGESTED {
                    button {
                        class: theme::toggle_button(false),
                        onclick: move |_| ask(suggestion.to_string()),
                        "{suggestion}"
                    }
                }
            }
            div { class: "mt-6 space-y-4",
                for exchange in thread() {
                    AnswerCard {
                        question: exchange.question.clone(),
                        reply: exchange.reply.clone(),
                        on_topic: move |topic: Topic| ask(topic_question(topic)),
                    }
                }
            }
        }
    }
}

#[component]
fn AnswerCard(question: String, reply: ComplianceAnswer, on_topic: EventHandler<Topic>) -> Element {
    let heading = reply
        .topic
        .map(|topic| topic.title())
        .unwrap_or("No matching topic");

    rsx! {
        article { class: "rounded-xl border border-slate-800 bg-slate-900/60 p-4 space-y-3",
            p { class: "text-sm text-slate-400", "Q: {question}" }
            div { class: "flex items-center justify-between gap-3",
                h3 { class: "font-semibold text-slate-100", "{heading}" }
                ConfidenceBadge { value: reply.confidence }
            }
            p { class: "text-sm text-slate-200", "{reply.answer}" }
            if !reply.sources.is_empty() {
                p { class: "text-xs {theme::TEXT_MUTED}", {format!("Sources: {}", reply.sources.join("; "))} }
            }
            if !reply.related.is_empty() {
                div { class: "flex flex-wrap items-center gap-2",
                    span { class: "text-xs {theme::TEXT_MUTED}", "Related:" }
                    for topic in reply.related.iter().copied() {
                        button {
                            class: "{theme::BUTTON_GHOST} text-xs",
                            onclick: move |_| on_topic.call(topic),
                            "{topic.title()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PartyScreening() -> Element {
    let mut name = use_signal(String::new);
    let mut country = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut result = use_signal(|| None::<ScreeningResult>);

    let on_screen = move |evt: FormEvent| {
        evt.prevent_default();
        let request = screening_request(&name(), &country());
        match screen(&request) {
            Ok(outcome) => {
                tracing::info!(
                    party = %outcome.screened_name,
                    status = ?outcome.status,
                    hits = outcome.hits.len(),
                    "screened party"
                );
                error.set(None);
                result.set(Some(outcome));
            }
            Err(err) => error.set(Some(format!("Cannot screen: {err}."))),
        }
    };

    rsx! {
        section { class: "{theme::PANEL}",
            h2 { class: "{theme::PANEL_TITLE}", "Denied-party screening" }
            form { class: "mt-4 grid gap-4 sm:grid-cols-3", onsubmit: on_screen,
                div { class: "sm:col-span-2",
                    label { class: "{theme::LABEL}", "Company or person" }
                    input { class: "{theme::INPUT}", value: name(), oninput: move |evt| name.set(evt.value()) }
                }
                div {
                    label { class: "{theme::LABEL}", "Country (optional)" }
                    input { class: "{theme::INPUT}", value: country(), oninput: move |evt| country.set(evt.value()) }
                }
                div { class: "sm:col-span-3",
                    button { class: "{theme::BUTTON_PRIMARY}", r#type: "submit", "Screen" }
                }
            }
            if let Some(message) = error() {
                p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
            }
            if let Some(outcome) = result() {
                div { class: "mt-4 space-y-3",
                    p { class: status_class(outcome.status),
                        "{outcome.screened_name}: {outcome.status.label()}"
                    }
                    if !outcome.hits.is_empty() {
                        div { class: "{theme::TABLE_CONTAINER}",
                            table { class: "min-w-full text-sm",
                                thead { class: "{theme::TABLE_HEADER}",
                                    tr {
                                        th { class: "px-3 py-2 text-left", "Entry" }
                                        th { class: "px-3 py-2 text-left", "Matched on" }
                                        th { class: "px-3 py-2 text-left", "List" }
                                        th { class: "px-3 py-2 text-left", "Country" }
                                        th { class: "px-3 py-2 text-right", "Score" }
                                    }
                                }
                                tbody { class: "{theme::TABLE_DIVIDER}",
                                    for hit in outcome.hits.iter() {
                                        tr {
                                            td { class: "px-3 py-2 text-slate-200",
                                                "{hit.entry_name}"
                                                p { class: "text-xs {theme::TEXT_MUTED}", "{hit.program}" }
                                            }
                                            td { class: "px-3 py-2 text-slate-300", "{hit.matched_on}" }
                                            td { class: "px-3 py-2 text-slate-300", "{hit.list}" }
                                            td { class: "px-3 py-2 text-slate-300", "{hit.country}" }
                                            td { class: "px-3 py-2 text-right text-slate-200", {format!("{:.0}%", hit.score * 100.0)} }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn topic_question(topic: Topic) -> String {
    format!("Tell me about {}", topic.title())
}

fn screening_request(name: &str, country: &str) -> ScreeningRequest {
    let country = country.trim();
    ScreeningRequest {
        name: name.trim().to_string(),
        country: (!country.is_empty()).then(|| country.to_string()),
    }
}

fn status_class(status: ScreeningStatus) -> &'static str {
    match status {
        ScreeningStatus::Clear => {
            "rounded-lg border border-emerald-500/40 bg-emerald-500/10 px-3 py-2 text-sm font-semibold text-emerald-200"
        }
        ScreeningStatus::PotentialMatch => {
            "rounded-lg border border-amber-500/40 bg-amber-500/10 px-3 py-2 text-sm font-semibold text-amber-200"
        }
        ScreeningStatus::Match => {
            "rounded-lg border border-rose-500/40 bg-rose-500/10 px-3 py-2 text-sm font-semibold text-rose-200"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_topic_questions_resolve_to_their_topic() {
        for topic in Topic::ALL {
            let reply = answer(&topic_question(topic)).unwrap();
            assert_eq!(reply.topic, Some(topic), "{}", topic.title());
        }
    }

    #[test]
    fn blank_country_is_omitted() {
        assert_eq!(screening_request(" Acme ", "  ").country, None);
        assert_eq!(
            screening_request("Acme", "Iran").country.as_deref(),
            Some("Iran")
        );
    }
}
