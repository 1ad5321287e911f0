use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, Route},
    domain::{AppState, CartItem, CartTotals, Currency, TAX_RATE},
    ui::{
        components::{
            cart_table::CartTable,
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        forms::{parse_positive, parse_quantity, require_text},
        theme,
    },
    util::{generate_id, persistence::SharedStore},
};

#[component]
pub fn CartPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let store = use_context::<SharedStore>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut name_input = use_signal(String::new);
    let mut price_input = use_signal(String::new);
    let mut quantity_input = use_signal(|| "1".to_string());
    let mut form_error = use_signal(|| None::<String>);
    let mut receipt = use_signal(|| None::<CartTotals>);

    let (items, totals, currency) =
        state.with(|st| (st.cart.items().to_vec(), st.cart.totals(), st.currency));

    let on_quantity = {
        let mut state = state.clone();
        let store = store.clone();
        move |(id, quantity): (String, i64)| {
            let known = state.with_mut(|st| st.cart.update_quantity(&id, quantity));
            if known {
                persist_user_state(&state, &store);
            } else {
                tracing::debug!(%id, "quantity change for unknown cart item");
            }
        }
    };

    let on_remove = {
        let mut state = state.clone();
        let store = store.clone();
        move |id: String| {
            state.with_mut(|st| st.cart.remove_item(&id));
            persist_user_state(&state, &store);
        }
    };

    let on_add_custom = {
        let mut state = state.clone();
        let store = store.clone();
        let toasts = toasts.clone();
        move |_| {
            let parsed = parse_custom_item(&name_input(), &price_input(), &quantity_input());
            match parsed {
                Ok(item) => {
                    let name = item.name.clone();
                    state.with_mut(|st| st.cart.add_item(item));
                    persist_user_state(&state, &store);
                    name_input.set(String::new());
                    price_input.set(String::new());
                    quantity_input.set("1".to_string());
                    form_error.set(None);
                    push_toast(toasts.clone(), ToastKind::Success, format!("Added {name}."));
                }
                Err(message) => form_error.set(Some(message)),
            }
        }
    };

    let on_clear = {
        let mut state = state.clone();
        let store = store.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| st.cart.clear());
            persist_user_state(&state, &store);
            push_toast(toasts.clone(), ToastKind::Info, "Cart cleared.");
        }
    };

    let on_checkout = {
        let mut state = state.clone();
        let store = store.clone();
        let toasts = toasts.clone();
        move |_| {
            let result = state.with_mut(|st| st.cart.checkout());
            match result {
                Ok(final_totals) => {
                    persist_user_state(&state, &store);
                    tracing::info!(
                        items = final_totals.item_count,
                        total_usd = final_totals.total,
                        "checkout completed"
                    );
                    receipt.set(Some(final_totals));
                    push_toast(toasts.clone(), ToastKind::Success, "Order placed. Thank you!");
                }
                Err(err) => push_toast(toasts.clone(), ToastKind::Error, err.to_string()),
            }
        }
    };

    let tax_label = format!("Tax ({:.0}%)", TAX_RATE * 100.0);

    rsx! {
        div { class: "space-y-8",
            div { class: "flex items-center justify-between",
                h2 { class: "text-2xl font-semibold text-slate-100", "Your cart" }
                button { class: "{theme::BUTTON_GHOST}", onclick: move |_| { nav.push(Route::Home {}); }, "← Continue shopping" }
            }

            if let Some(done) = receipt() {
                div { class: "rounded-xl border border-emerald-500/40 bg-emerald-500/10 p-4 text-sm text-emerald-100",
                    "Order confirmed: {done.item_count} item(s), total {currency.format_price(done.total)}."
                }
            }

            CartTable {
                items,
                currency,
                on_quantity,
                on_remove,
            }

            div { class: "grid gap-4 sm:grid-cols-3",
                KpiCard { title: "Subtotal".to_string(), value: currency.format_price(totals.subtotal), description: Some(format!("{} item(s)", totals.item_count)) }
                KpiCard { title: tax_label, value: currency.format_price(totals.tax), description: None }
                KpiCard { title: "Total".to_string(), value: currency.format_price(totals.total), description: Some(format!("Charged in USD: {}", Currency::Usd.format_price(totals.total))), highlight: true }
            }

            div { class: "flex flex-wrap gap-3",
                button { class: "{theme::BUTTON_PRIMARY}", disabled: totals.item_count == 0, onclick: on_checkout, "Checkout" }
                button { class: "{theme::BUTTON_DANGER}", disabled: totals.item_count == 0, onclick: on_clear, "Clear cart" }
            }

            section { class: "{theme::PANEL}",
                h2 { class: "{theme::PANEL_TITLE}", "Add a custom line" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-3",
                    div {
                        label { class: "{theme::LABEL}", "Description" }
                        input { class: "{theme::INPUT}", value: name_input(), oninput: move |evt| name_input.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Unit price (USD)" }
                        input { class: "{theme::INPUT}", value: price_input(), oninput: move |evt| price_input.set(evt.value()) }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Quantity" }
                        input { class: "{theme::INPUT}", r#type: "number", min: "1", value: quantity_input(), oninput: move |evt| quantity_input.set(evt.value()) }
                    }
                }
                if let Some(message) = form_error() {
                    p { class: "mt-3 {theme::ERROR_TEXT}", "{message}" }
                }
                button { class: "mt-4 {theme::BUTTON_SECONDARY}", onclick: on_add_custom, "Add to cart" }
            }
        }
    }
}

fn parse_custom_item(name: &str, price: &str, quantity: &str) -> Result<CartItem, String> {
    let name = require_text(name, "Description")?;
    let price = parse_positive(price, "Price")?;
    let quantity = parse_quantity(quantity)?;
    Ok(CartItem::new(generate_id("custom"), name, price)
        .with_quantity(quantity)
        .with_category("Custom"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_item_validation() {
        let item = parse_custom_item("Pallet wrap", "12.50", "4").unwrap();
        assert_eq!(item.line_total(), 50.0);
        assert!(item.id.starts_with("custom-"));

        assert!(parse_custom_item("", "12", "1").is_err());
        assert!(parse_custom_item("Wrap", "0", "1").is_err());
        assert!(parse_custom_item("Wrap", "5", "0").is_err());
    }
}
