use dioxus::prelude::*;

use crate::app::{persist_user_state, Route};
use crate::domain::{AppState, Currency};
use crate::ui::theme;
use crate::util::persistence::SharedStore;
use crate::util::version::{version_label, APP_NAME, APP_TAGLINE};

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let (currency, cart_count, user_label) = state.with(|st| {
        (
            st.currency,
            st.cart.item_count(),
            st.auth.display_name().map(str::to_string),
        )
    });

    let on_currency = {
        let mut state = state.clone();
        move |evt: FormEvent| match Currency::parse(&evt.value()) {
            Ok(next) => {
                state.with_mut(|st| st.currency = next);
                persist_user_state(&state, &store);
            }
            Err(err) => tracing::warn!("ignoring currency selection: {err}"),
        }
    };

    rsx! {
        div { class: "app-shell min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-6xl flex-wrap items-center justify-between gap-4",
                    button {
                        class: "flex items-center gap-3 text-left",
                        onclick: move |_| { nav.push(Route::Home {}); },
                        span { class: "text-2xl", "🚢" }
                        div {
                            h1 { class: "text-xl font-semibold tracking-tight text-teal-200", "{APP_NAME}" }
                            p { class: "text-xs text-slate-500 italic", "{APP_TAGLINE}" }
                        }
                    }

                    nav { class: "flex flex-wrap gap-1 text-sm",
                        NavButton { active: matches!(current_route, Route::Classify {}), onclick: move |_| { nav.push(Route::Classify {}); }, label: "HS Lookup" }
                        NavButton { active: matches!(current_route, Route::Rates {}), onclick: move |_| { nav.push(Route::Rates {}); }, label: "Rates" }
                        NavButton { active: matches!(current_route, Route::LandedCost {}), onclick: move |_| { nav.push(Route::LandedCost {}); }, label: "Landed Cost" }
                        NavButton { active: matches!(current_route, Route::Carbon {}), onclick: move |_| { nav.push(Route::Carbon {}); }, label: "Carbon" }
                        NavButton { active: matches!(current_route, Route::Risk {}), onclick: move |_| { nav.push(Route::Risk {}); }, label: "Risk" }
                        NavButton { active: matches!(current_route, Route::Compliance {}), onclick: move |_| { nav.push(Route::Compliance {}); }, label: "Compliance" }
                    }

                    div { class: "flex items-center gap-2 text-sm",
                        select {
                            class: "rounded-full border border-slate-700 bg-slate-900 px-3 py-1 text-xs font-semibold text-slate-200",
                            title: "Display currency",
                            value: currency.code(),
                            onchange: on_currency,
                            for choice in Currency::ALL {
                                option { value: choice.code(), selected: choice == currency, "{choice.code()}" }
                            }
                        }
                        NavButton {
                            active: matches!(current_route, Route::Cart {}),
                            onclick: move |_| { nav.push(Route::Cart {}); },
                            label: "🛒 Cart",
                        }
                        if cart_count > 0 {
                            span { class: "cart-badge rounded-full bg-teal-500 px-2 py-0.5 text-xs font-bold text-slate-950", "{cart_count}" }
                        }
                        NavButton {
                            active: matches!(current_route, Route::Account {}),
                            onclick: move |_| { nav.push(Route::Account {}); },
                            label: "👤",
                        }
                        if let Some(name) = user_label {
                            span { class: "hidden text-xs text-slate-400 sm:inline", "{name}" }
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
            footer { class: "mx-auto max-w-6xl px-6 pb-8 text-xs {theme::TEXT_MUTED}",
                "{APP_NAME} {version_label()} · All estimates are indicative and not legal or customs advice."
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
