use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, Route},
    domain::{
        catalog::{PLANS, REPORTS},
        AppState, Offering,
    },
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::persistence::SharedStore,
};

struct Tool {
    icon: &'static str,
    title: &'static str,
    summary: &'static str,
    route: fn() -> Route,
}

const TOOLS: &[Tool] = &[
    Tool {
        icon: "🔎",
        title: "HS Code Lookup",
        summary: "Describe a product and get a tariff classification with duty rate.",
        route: || Route::Classify {},
    },
    Tool {
        icon: "📦",
        title: "Rate Comparison",
        summary: "Compare ocean, air, rail, truck and express quotes side by side.",
        route: || Route::Rates {},
    },
    Tool {
        icon: "🧾",
        title: "Landed Cost",
        summary: "Duty, tax, insurance and brokerage on a CIF basis.",
        route: || Route::LandedCost {},
    },
    Tool {
        icon: "🌱",
        title: "Carbon Footprint",
        summary: "Shipment emissions, offset cost and greener alternatives.",
        route: || Route::Carbon {},
    },
    Tool {
        icon: "⚠️",
        title: "Risk Simulator",
        summary: "Stress-test a lane against strikes, weather and canal closures.",
        route: || Route::Risk {},
    },
    Tool {
        icon: "⚖️",
        title: "Compliance Desk",
        summary: "Ask customs questions and screen parties against denied lists.",
        route: || Route::Compliance {},
    },
];

#[component]
pub fn HomePage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();
    let currency = state.with(|st| st.currency);

    let on_add = move |offering: &'static Offering| {
        let mut state = state.clone();
        state.with_mut(|st| st.cart.add_item(offering.to_cart_item()));
        persist_user_state(&state, &store);
        push_toast(
            toasts.clone(),
            ToastKind::Success,
            format!("Added {} to your cart.", offering.name),
        );
    };
    let on_add_report = on_add.clone();

    rsx! {
        div { class: "space-y-16",
            section { class: "space-y-6 text-center",
                p { class: "text-xs font-semibold uppercase tracking-[0.3em] {theme::TEXT_ACCENT}", "Import · Export · Compliance" }
                h2 { class: "text-4xl font-semibold tracking-tight text-slate-100 sm:text-5xl",
                    "Ship smarter across borders"
                }
                p { class: "mx-auto max-w-2xl text-base text-slate-400",
                    "Classify products, compare carriers, price the landed cost and check compliance before your goods leave the dock."
                }
                div { class: "flex justify-center gap-3",
                    button { class: "{theme::BUTTON_PRIMARY}", onclick: move |_| { nav.push(Route::Classify {}); }, "Try HS lookup" }
                    button { class: "{theme::BUTTON_SECONDARY}", onclick: move |_| { nav.push(Route::Rates {}); }, "Compare rates" }
                }
            }

            section {
                h2 { class: "{theme::PANEL_TITLE}", "Tools" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                    for tool in TOOLS {
                        button {
                            class: "rounded-xl border border-slate-800 bg-slate-900/40 p-5 text-left transition hover:border-teal-500/50 hover:bg-slate-900/80",
                            onclick: move |_| { nav.push((tool.route)()); },
                            span { class: "text-2xl", "{tool.icon}" }
                            h3 { class: "mt-3 text-base font-semibold text-slate-100", "{tool.title}" }
                            p { class: "mt-1 text-sm text-slate-400", "{tool.summary}" }
                        }
                    }
                }
            }

            section {
                h2 { class: "{theme::PANEL_TITLE}", "Plans" }
                div { class: "mt-4 grid gap-4 lg:grid-cols-3",
                    for plan in PLANS {
                        div {
                            class: plan_class(plan.featured),
                            div { class: "flex items-baseline justify-between",
                                h3 { class: "text-lg font-semibold text-slate-100", "{plan.name}" }
                                if plan.featured {
                                    span { class: "rounded-full bg-teal-500/20 px-2 py-0.5 text-[10px] font-semibold uppercase text-teal-200", "Popular" }
                                }
                            }
                            p { class: "mt-2 text-3xl font-semibold text-slate-100",
                                {currency.format_price(plan.price)}
                                span { class: "ml-1 text-sm font-normal {theme::TEXT_MUTED}", {period_label(plan)} }
                            }
                            p { class: "mt-2 text-sm text-slate-400", "{plan.blurb}" }
                            ul { class: "mt-4 space-y-1 text-sm text-slate-300",
                                for feature in plan.features.iter() {
                                    li { "✓ {feature}" }
                                }
                            }
                            button {
                                class: "mt-6 w-full {theme::BUTTON_PRIMARY}",
                                onclick: {
                                    let on_add = on_add.clone();
                                    move |_| on_add(plan)
                                },
                                "Add to cart"
                            }
                        }
                    }
                }
            }

            section {
                h2 { class: "{theme::PANEL_TITLE}", "Expert reports" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    for report in REPORTS {
                        div { class: "{theme::PANEL} flex items-center justify-between gap-4",
                            div {
                                h3 { class: "font-semibold text-slate-100", "{report.name}" }
                                p { class: "text-sm text-slate-400", "{report.blurb}" }
                            }
                            div { class: "text-right",
                                p { class: "font-semibold text-slate-100", {currency.format_price(report.price)} }
                                button {
                                    class: "mt-2 {theme::BUTTON_SECONDARY}",
                                    onclick: {
                                        let on_add = on_add_report.clone();
                                        move |_| on_add(report)
                                    },
                                    "Add"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn plan_class(featured: bool) -> &'static str {
    if featured {
        "rounded-xl border border-teal-500/60 bg-teal-500/5 p-6"
    } else {
        theme::PANEL
    }
}

fn period_label(offering: &Offering) -> String {
    match offering.duration {
        Some("yearly") => "/ year".to_string(),
        Some("monthly") => "/ month".to_string(),
        Some(other) => format!("/ {other}"),
        None => "one-off".to_string(),
    }
}
