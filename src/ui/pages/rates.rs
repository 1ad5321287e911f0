use dioxus::prelude::*;

use crate::{
    domain::{
        compare_rates, AppState, Currency, RateComparison, RateQuote, RateRequest, TransportMode,
    },
    ui::{
        components::{kpi_card::KpiCard, rate_table::RateTable},
        forms::{parse_positive, require_text},
        theme,
    },
};

#[component]
pub fn RatesPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let currency = state.with(|st| st.currency);

    let mut origin = use_signal(|| "Shanghai, China".to_string());
    let mut destination = use_signal(|| "Toronto, Canada".to_string());
    let mut weight = use_signal(|| "500".to_string());
    let mut modes = use_signal(Vec::<TransportMode>::new);
    let mut error = use_signal(|| None::<String>);
    let mut comparison = use_signal(|| None::<RateComparison>);

    let on_compare = move |_| {
        match build_request(&origin(), &destination(), &weight(), modes()) {
            Ok(request) => {
                let result = compare_rates(&request, &mut rand::thread_rng());
                tracing::info!(
                    origin = %request.origin,
                    destination = %request.destination,
                    quotes = result.quotes.len(),
                    "compared carrier rates"
                );
                error.set(None);
                comparison.set(Some(result));
            }
            Err(message) => error.set(Some(message)),
        }
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Compare carrier rates" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-3",
                    div {
                        label { class: "{theme::LABEL}", "Origin" }
                        input { class: "{theme::INPUT}", value: origin(), oninput: move |evt| origin.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Destination" }
                        input { class: "{theme::INPUT}", value: destination(), oninput: move |evt| destination.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Weight (kg)" }
                        input { class: "{theme::INPUT}", value: weight(), oninput: move |evt| weight.set(evt.value()) }
                    }
                }
                div { class: "mt-4 flex flex-wrap items-center gap-2",
                    span { class: "{theme::LABEL}", "Modes" }
                    for mode in TransportMode::ALL {
                        button {
                            class: theme::toggle_button(modes().contains(&mode)),
                            onclick: move |_| modes.with_mut(|selected| toggle_mode(selected, mode)),
                            "{mode.label()}"
                        }
                    }
                    span { class: "text-xs {theme::TEXT_MUTED}", "(none selected = all)" }
                }
                if let Some(message) = error() {
                    p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
                }
                button { class: "mt-4 {theme::BUTTON_PRIMARY}", onclick: on_compare, "Get quotes" }
            }

            if let Some(result) = comparison() {
                div { class: "grid gap-4 sm:grid-cols-3",
                    KpiCard { title: "Cheapest".to_string(), value: quote_price(result.cheapest.as_ref(), currency), description: quote_caption(result.cheapest.as_ref()) }
                    KpiCard { title: "Fastest".to_string(), value: quote_days(result.fastest.as_ref()), description: quote_caption(result.fastest.as_ref()) }
                    KpiCard { title: "Best value".to_string(), value: quote_price(result.best_value.as_ref(), currency), description: quote_caption(result.best_value.as_ref()), highlight: true }
                }
                if !result.recommendations.is_empty() {
                    section { class: "{theme::PANEL}",
                        h2 { class: "{theme::PANEL_TITLE}", "Recommendations" }
                        ul { class: "mt-3 list-disc space-y-1 pl-5 text-sm text-slate-300",
                            for line in result.recommendations.iter() {
                                li { "{line}" }
                            }
                        }
                    }
                }
                RateTable { comparison: result.clone(), currency }
                p { class: "text-xs {theme::TEXT_MUTED}",
                    {format!("Indicative quotes only. Distance factor {:.1}×; prices vary ±5% per request.", result.distance_factor)}
                }
            }
        }
    }
}

fn build_request(
    origin: &str,
    destination: &str,
    weight: &str,
    modes: Vec<TransportMode>,
) -> Result<RateRequest, String> {
    Ok(RateRequest {
        origin: require_text(origin, "Origin")?,
        destination: require_text(destination, "Destination")?,
        weight_kg: parse_positive(weight, "Weight")?,
        modes,
    })
}

fn toggle_mode(selected: &mut Vec<TransportMode>, mode: TransportMode) {
    if let Some(pos) = selected.iter().position(|m| *m == mode) {
        selected.remove(pos);
    } else {
        selected.push(mode);
    }
}

fn quote_price(quote: Option<&RateQuote>, currency: Currency) -> String {
    quote
        .map(|q| currency.format_price(q.price_usd))
        .unwrap_or_else(|| "—".to_string())
}

fn quote_days(quote: Option<&RateQuote>) -> String {
    quote
        .map(|q| format!("{} days", q.transit_days))
        .unwrap_or_else(|| "—".to_string())
}

fn quote_caption(quote: Option<&RateQuote>) -> Option<String> {
    quote.map(|q| format!("{} · {}", q.carrier, q.mode.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validation() {
        let request = build_request(" Busan ", "Chicago", "250", vec![TransportMode::Air]).unwrap();
        assert_eq!(request.origin, "Busan");
        assert_eq!(request.weight_kg, 250.0);

        assert_eq!(
            build_request("Busan", "Chicago", "0", Vec::new()),
            Err("Weight must be greater than zero".to_string())
        );
        assert!(build_request("", "Chicago", "10", Vec::new()).is_err());
    }

    #[test]
    fn toggling_modes() {
        let mut selected = vec![TransportMode::Ocean];
        toggle_mode(&mut selected, TransportMode::Air);
        toggle_mode(&mut selected, TransportMode::Ocean);
        assert_eq!(selected, vec![TransportMode::Air]);
    }
}
