use dioxus::prelude::*;

use crate::{
    domain::{risk_map, simulate, AppState, RiskInput, RiskReport, Scenario, Severity},
    ui::{
        components::{
            kpi_card::KpiCard,
            risk_indicator::{level_theme, RiskIndicator},
        },
        forms::{parse_positive, require_text},
        theme,
    },
};

#[component]
pub fn RiskPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let currency = state.with(|st| st.currency);

    let mut scenario = use_signal(|| Scenario::PortStrike);
    let mut severity = use_signal(Severity::default);
    let mut origin = use_signal(|| "Shanghai, China".to_string());
    let mut value = use_signal(|| "50000".to_string());
    let mut error = use_signal(|| None::<String>);
    let mut report = use_signal(|| None::<RiskReport>);
    let hotspots = use_hook(risk_map);

    let on_simulate = move |_| {
        match build_input(scenario(), severity(), &origin(), &value()) {
            Ok(input) => {
                let result = simulate(&input, &mut rand::thread_rng());
                tracing::info!(
                    scenario = ?input.scenario,
                    severity = ?input.severity,
                    score = result.score,
                    "simulated disruption"
                );
                error.set(None);
                report.set(Some(result));
            }
            Err(message) => error.set(Some(message)),
        }
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Disruption simulator" }
                div { class: "mt-4 flex flex-wrap gap-2",
                    for choice in Scenario::ALL {
                        button {
                            class: theme::toggle_button(scenario() == choice),
                            onclick: move |_| scenario.set(choice),
                            "{choice.label()}"
                        }
                    }
                }
                div { class: "mt-4 flex flex-wrap items-center gap-2",
                    span { class: "{theme::LABEL}", "Severity" }
                    for level in Severity::ALL {
                        button {
                            class: theme::toggle_button(severity() == level),
                            onclick: move |_| severity.set(level),
                            "{level.label()}"
                        }
                    }
                }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: "{theme::LABEL}", "Origin" }
                        input { class: "{theme::INPUT}", value: origin(), oninput: move |evt| origin.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Shipment value (USD)" }
                        input { class: "{theme::INPUT}", value: value(), oninput: move |evt| value.set(evt.value()) }
                    }
                }
                if let Some(message) = error() {
                    p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
                }
                button { class: "mt-4 {theme::BUTTON_PRIMARY}", onclick: on_simulate, "Run simulation" }
            }

            if let Some(result) = report() {
                div { class: "grid gap-4 sm:grid-cols-3",
                    RiskIndicator { report: result.clone() }
                    KpiCard { title: "Expected delay".to_string(), value: format!("{} days", result.delay_days), description: None }
                    KpiCard { title: "Cost impact".to_string(), value: currency.format_price(result.cost_impact_usd), description: Some(format!("{:.0}% probability", result.probability * 100.0)), highlight: true }
                }
                section { class: "{theme::PANEL}",
                    h2 { class: "{theme::PANEL_TITLE}", "Mitigation plan" }
                    ol { class: "mt-3 list-decimal space-y-1 pl-5 text-sm text-slate-300",
                        for step in result.mitigations.iter() {
                            li { "{step}" }
                        }
                    }
                }
            }

            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Global hotspots" }
                ul { class: "mt-3 grid gap-3 sm:grid-cols-2",
                    for point in hotspots {
                        li { class: "rounded-lg border px-3 py-2 text-sm {level_theme(point.level)}",
                            div { class: "flex items-center justify-between",
                                span { class: "font-semibold", "{point.name}" }
                                span { class: "text-xs uppercase", "{point.level.label()}" }
                            }
                            p { class: "mt-1 text-xs opacity-80", "{point.note}" }
                            p { class: "mt-1 font-mono text-[10px] opacity-60", {format!("{:.2}, {:.2}", point.lat, point.lon)} }
                        }
                    }
                }
            }
        }
    }
}

fn build_input(
    scenario: Scenario,
    severity: Severity,
    origin: &str,
    value: &str,
) -> Result<RiskInput, String> {
    Ok(RiskInput {
        scenario,
        severity,
        origin: require_text(origin, "Origin")?,
        shipment_value: parse_positive(value, "Shipment value")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_validation() {
        let input = build_input(Scenario::Pandemic, Severity::High, "Busan", "1,000").unwrap();
        assert_eq!(input.shipment_value, 1000.0);
        assert_eq!(input.severity, Severity::High);
        assert!(build_input(Scenario::Pandemic, Severity::Low, "", "1000").is_err());
        assert!(build_input(Scenario::Pandemic, Severity::Low, "Busan", "abc").is_err());
    }
}
