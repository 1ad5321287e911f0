use dioxus::prelude::*;

use crate::{
    domain::{
        carbon::{calculate, CarbonInput, CarbonReport, EmissionRating},
        TransportMode,
    },
    ui::{
        components::kpi_card::KpiCard,
        forms::{parse_positive, require_text},
        theme,
    },
};

#[component]
pub fn CarbonPage() -> Element {
    let mut origin = use_signal(|| "Rotterdam, Netherlands".to_string());
    let mut destination = use_signal(|| "Chicago, USA".to_string());
    let mut weight = use_signal(|| "1200".to_string());
    let mut distance = use_signal(String::new);
    let mut mode = use_signal(|| TransportMode::Ocean);
    let mut error = use_signal(|| None::<String>);
    let mut report = use_signal(|| None::<CarbonReport>);

    let on_calculate = move |_| {
        match build_input(&origin(), &destination(), &weight(), &distance(), mode()) {
            Ok(input) => {
                let result = calculate(&input);
                tracing::debug!(
                    mode = ?input.mode,
                    co2_kg = result.co2_kg,
                    "calculated shipment emissions"
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
                h2 { class: "{theme::PANEL_TITLE}", "Carbon footprint" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
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
                    div {
                        label { class: "{theme::LABEL}", "Distance (km, optional)" }
                        input { class: "{theme::INPUT}", placeholder: "estimated from regions", value: distance(), oninput: move |evt| distance.set(evt.value()) }
                    }
                }
                div { class: "mt-4 flex flex-wrap items-center gap-2",
                    span { class: "{theme::LABEL}", "Mode" }
                    for option_mode in TransportMode::ALL {
                        button {
                            class: theme::toggle_button(mode() == option_mode),
                            onclick: move |_| mode.set(option_mode),
                            "{option_mode.label()}"
                        }
                    }
                }
                if let Some(message) = error() {
                    p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
                }
                button { class: "mt-4 {theme::BUTTON_PRIMARY}", onclick: on_calculate, "Calculate" }
            }

            if let Some(result) = report() {
                div { class: "grid gap-4 sm:grid-cols-4",
                    KpiCard { title: "CO₂e".to_string(), value: format!("{:.1} kg", result.co2_kg), description: Some(format!("{:.0} km by {}", result.distance_km, result.mode.label())), highlight: true }
                    KpiCard { title: "Rating".to_string(), value: result.rating.label().to_string(), description: Some(rating_caption(result.rating).to_string()) }
                    KpiCard { title: "Trees to offset".to_string(), value: format!("{:.1}", result.trees_to_offset), description: Some("one year of absorption".to_string()) }
                    KpiCard { title: "Offset cost".to_string(), value: format!("${:.2}", result.offset_cost_usd), description: Some("verified credits, USD".to_string()) }
                }
                section { class: "{theme::PANEL}",
                    h2 { class: "{theme::PANEL_TITLE}", "Other modes" }
                    ul { class: "mt-3 space-y-2 text-sm",
                        for alternative in result.alternatives.iter() {
                            li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                                span { class: "text-slate-300", "{alternative.mode.label()}" }
                                span { class: "text-slate-400", {format!("{:.1} kg", alternative.co2_kg)} }
                                span { class: savings_class(alternative.savings_pct), {format!("{:+.0}%", -alternative.savings_pct)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn build_input(
    origin: &str,
    destination: &str,
    weight: &str,
    distance: &str,
    mode: TransportMode,
) -> Result<CarbonInput, String> {
    let distance_km = if distance.trim().is_empty() {
        None
    } else {
        Some(parse_positive(distance, "Distance")?)
    };
    Ok(CarbonInput {
        origin: require_text(origin, "Origin")?,
        destination: require_text(destination, "Destination")?,
        weight_kg: parse_positive(weight, "Weight")?,
        mode,
        distance_km,
    })
}

fn rating_caption(rating: EmissionRating) -> &'static str {
    match rating {
        EmissionRating::A => "very low impact",
        EmissionRating::B => "low impact",
        EmissionRating::C => "moderate impact",
        EmissionRating::D => "high impact",
        EmissionRating::E => "very high impact",
    }
}

fn savings_class(savings_pct: f64) -> &'static str {
    if savings_pct > 0.0 {
        "font-semibold text-emerald-300"
    } else {
        "font-semibold text-rose-300"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_distance_override() {
        let input = build_input("Busan", "Chicago", "100", "", TransportMode::Air).unwrap();
        assert_eq!(input.distance_km, None);
        let input = build_input("Busan", "Chicago", "100", "8000", TransportMode::Air).unwrap();
        assert_eq!(input.distance_km, Some(8000.0));
        assert!(build_input("Busan", "Chicago", "100", "0", TransportMode::Air).is_err());
        assert!(build_input("Busan", "Chicago", "-1", "", TransportMode::Air).is_err());
    }
}
