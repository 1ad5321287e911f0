use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    config::{AppConfig, LogFormat},
    domain::{AppState, Currency},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        forms::parse_non_negative,
        theme,
    },
    util::{persistence::SharedStore, version},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let config = use_context::<AppConfig>();

    let mut sample = use_signal(|| "1000".to_string());
    let currency = state.with(|st| st.currency);
    let preview = conversion_preview(&sample());

    let on_select = {
        let store = store.clone();
        move |next: Currency| {
            let mut state = state.clone();
            state.with_mut(|st| st.currency = next);
            persist_user_state(&state, &store);
            push_toast(toasts, ToastKind::Success, format!("Prices now shown in {next}."));
        }
    };

    let on_reset = {
        let store = store.clone();
        move |_| {
            let mut state = state.clone();
            state.with_mut(|st| {
                st.cart.clear();
                st.currency = Currency::default();
            });
            persist_user_state(&state, &store);
            tracing::info!("cleared saved cart and currency");
            push_toast(toasts, ToastKind::Info, "Saved cart and currency were reset.");
        }
    };

    let log_format = match config.log_format {
        LogFormat::Compact => "compact",
        LogFormat::Json => "json",
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Display currency" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Prices are stored in USD and converted at fixed indicative rates. Checkout always charges USD."
                }
                div { class: "mt-4 flex gap-2",
                    for choice in Currency::ALL {
                        button {
                            class: theme::toggle_button(choice == currency),
                            onclick: {
                                let on_select = on_select.clone();
                                move |_| on_select(choice)
                            },
                            "{choice.code()} ({choice.symbol()})"
                        }
                    }
                }
                div { class: "mt-6 max-w-xs",
                    label { class: "{theme::LABEL}", "Preview amount (USD)" }
                    input { class: "{theme::INPUT}", value: sample(), oninput: move |evt| sample.set(evt.value()) }
                }
                {match preview {
                    Ok(rows) => rsx! {
                        table { class: "mt-4 text-sm",
                            tbody { class: "{theme::TABLE_DIVIDER}",
                                for (code, rate, formatted) in rows {
                                    tr {
                                        td { class: "py-1 pr-6 text-slate-400", "{code}" }
                                        td { class: "py-1 pr-6 text-xs {theme::TEXT_MUTED}", {format!("× {rate:.2}")} }
                                        td { class: "py-1 text-right text-slate-200", "{formatted}" }
                                    }
                                }
                            }
                        }
                    },
                    Err(message) => rsx! { p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" } },
                }}
            }

            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Saved data" }
                p { class: "mt-2 text-sm text-slate-400",
                    "The cart, display currency and sign-in token are kept on this device."
                }
                button { class: "mt-4 {theme::BUTTON_DANGER}", onclick: on_reset, "Reset cart and currency" }
            }

            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "About" }
                dl { class: "mt-3 grid grid-cols-2 gap-y-2 text-sm",
                    dt { class: "text-slate-500", "Version" }
                    dd { class: "text-slate-200", "{version::version_label()}" }
                    dt { class: "text-slate-500", "Account API" }
                    dd { class: "font-mono text-xs text-slate-200", "{config.api_base_url}" }
                    dt { class: "text-slate-500", "Log format" }
                    dd { class: "text-slate-200", "{log_format}" }
                }
            }
        }
    }
}

/// One row per currency: code, rate and the formatted amount.
fn conversion_preview(raw_usd: &str) -> Result<Vec<(&'static str, f64, String)>, String> {
    let amount = parse_non_negative(raw_usd, "Amount")?;
    Ok(Currency::ALL
        .iter()
        .map(|currency| (currency.code(), currency.rate(), currency.format_price(amount)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_lists_every_currency() {
        let rows = conversion_preview("1000").unwrap();
        assert_eq!(rows.len(), Currency::ALL.len());
        assert_eq!(rows[0], ("USD", 1.0, "$1,000.00".to_string()));
        assert_eq!(rows[1].2, "CA$1,360.00");
        assert!(conversion_preview("-3").is_err());
    }
}
