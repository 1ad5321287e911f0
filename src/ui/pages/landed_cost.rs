use dioxus::prelude::*;

use crate::{
    domain::{
        landed_cost::{estimate_for_product, ProductLandedCost},
        AppState, Currency,
    },
    ui::{
        components::{confidence_badge::ConfidenceBadge, kpi_card::KpiCard},
        forms::{parse_non_negative, parse_positive, require_text},
        theme,
    },
};

const DESTINATIONS: &[&str] = &["Canada", "United States", "European Union", "Other"];

#[component]
pub fn LandedCostPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let currency = state.with(|st| st.currency);

    let mut product = use_signal(|| "cotton t-shirt".to_string());
    let mut value = use_signal(|| "2500".to_string());
    let mut shipping = use_signal(|| "350".to_string());
    let mut destination = use_signal(|| DESTINATIONS[0].to_string());
    let mut error = use_signal(|| None::<String>);
    let mut result = use_signal(|| None::<ProductLandedCost>);

    let on_calculate = move |_| {
        match calculate(&product(), &value(), &shipping(), &destination()) {
            Ok(estimate) => {
                tracing::debug!(
                    hs_code = %estimate.classification.hs_code,
                    total_usd = estimate.breakdown.total,
                    "estimated landed cost"
                );
                error.set(None);
                result.set(Some(estimate));
            }
            Err(message) => error.set(Some(message)),
        }
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Landed cost calculator" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Duty is assessed on the CIF value (goods + freight + insurance). Amounts are entered in USD."
                }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: "{theme::LABEL}", "Product" }
                        input { class: "{theme::INPUT}", value: product(), oninput: move |evt| product.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Destination" }
                        select {
                            class: "{theme::INPUT}",
                            value: destination(),
                            onchange: move |evt| destination.set(evt.value()),
                            for option_name in DESTINATIONS {
                                option { value: *option_name, selected: destination() == *option_name, "{option_name}" }
                            }
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Goods value (USD)" }
                        input { class: "{theme::INPUT}", value: value(), oninput: move |evt| value.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Freight cost (USD)" }
                        input { class: "{theme::INPUT}", value: shipping(), oninput: move |evt| shipping.set(evt.value()) }
                    }
                }
                if let Some(message) = error() {
                    p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
                }
                button { class: "mt-4 {theme::BUTTON_PRIMARY}", onclick: on_calculate, "Calculate" }
            }

            if let Some(estimate) = result() {
                LandedCostResult { estimate, currency }
            }
        }
    }
}

#[component]
fn LandedCostResult(estimate: ProductLandedCost, currency: Currency) -> Element {
    let breakdown = estimate.breakdown.clone();
    let classification = estimate.classification.clone();
    let rows = [
        ("Goods value", breakdown.product_value),
        ("Freight", breakdown.shipping),
        ("Insurance", breakdown.insurance),
        ("Duty", breakdown.duty),
        ("Import tax", breakdown.tax),
        ("Brokerage", breakdown.brokerage_fee),
    ];
    let duty_caption = format!(
        "HS {} at {:.1}%",
        classification.hs_code,
        classification.duty_rate * 100.0
    );
    let tax_caption = format!("{:.0}% destination tax", estimate.destination_tax_rate * 100.0);
    let effective = format!("{:.1}%", breakdown.effective_rate * 100.0);

    rsx! {
        div { class: "grid gap-4 sm:grid-cols-3",
            KpiCard { title: "Landed total".to_string(), value: currency.format_price(breakdown.total), description: Some(format!("{effective} over goods value")), highlight: true }
            KpiCard { title: "Duty".to_string(), value: currency.format_price(breakdown.duty), description: Some(duty_caption) }
            KpiCard { title: "Tax".to_string(), value: currency.format_price(breakdown.tax), description: Some(tax_caption) }
        }
        section { class: "{theme::PANEL}",
            div { class: "flex items-center justify-between",
                h2 { class: "{theme::PANEL_TITLE}", "Breakdown" }
                ConfidenceBadge { value: classification.confidence }
            }
            p { class: "mt-1 text-xs {theme::TEXT_MUTED}", "{classification.description}" }
            table { class: "mt-4 min-w-full text-sm",
                tbody { class: "{theme::TABLE_DIVIDER}",
                    for (label, amount) in rows {
                        tr {
                            td { class: "py-2 text-slate-400", "{label}" }
                            td { class: "py-2 text-right text-slate-200", {currency.format_price(amount)} }
                        }
                    }
                    tr {
                        td { class: "py-2 font-semibold text-slate-100", "Total" }
                        td { class: "py-2 text-right font-semibold text-slate-100", {currency.format_price(breakdown.total)} }
                    }
                }
            }
        }
    }
}

fn calculate(
    product: &str,
    value: &str,
    shipping: &str,
    destination: &str,
) -> Result<ProductLandedCost, String> {
    let product = require_text(product, "Product")?;
    let value = parse_positive(value, "Goods value")?;
    let shipping = parse_non_negative(shipping, "Freight cost")?;
    Ok(estimate_for_product(&product, value, shipping, destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_validates_then_estimates() {
        let estimate = calculate("laptop", "1000", "", "Canada").unwrap();
        assert_eq!(estimate.breakdown.shipping, 0.0);
        assert_eq!(estimate.destination_tax_rate, 0.13);
        assert_eq!(estimate.classification.hs_code, "8471.30");

        assert!(calculate("laptop", "0", "10", "Canada").is_err());
        assert!(calculate("laptop", "100", "-5", "Canada").is_err());
        assert!(calculate(" ", "100", "5", "Canada").is_err());
    }
}
