use dioxus::prelude::*;

use crate::domain::{CartItem, Currency};
use crate::ui::theme;

#[component]
pub fn CartTable(
    items: Vec<CartItem>,
    currency: Currency,
    on_quantity: EventHandler<(String, i64)>,
    on_remove: EventHandler<String>,
) -> Element {
    let is_empty = items.is_empty();
    rsx! {
        div {
            class: "{theme::TABLE_CONTAINER}",
            table {
                class: "min-w-full {theme::TABLE_DIVIDER} text-sm",
                thead {
                    class: "{theme::TABLE_HEADER} text-left tracking-wide",
                    tr {
                        th { class: "px-4 py-3 font-medium", "Item" }
                        th { class: "px-4 py-3 font-medium", "Price" }
                        th { class: "px-4 py-3 font-medium text-center", "Qty" }
                        th { class: "px-4 py-3 font-medium text-right", "Line total" }
                        th { class: "px-4 py-3" }
                    }
                }
                tbody {
                    class: "{theme::TABLE_DIVIDER}",
                    for item in items {
                        CartRowView {
                            key: "{item.id}",
                            item,
                            currency,
                            on_quantity: on_quantity.clone(),
                            on_remove: on_remove.clone(),
                        }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "px-4 py-6 text-center text-sm {theme::TEXT_MUTED}",
                                colspan: "5",
                                "Your cart is empty. Pick a plan or report to get started."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct CartRowViewProps {
    item: CartItem,
    currency: Currency,
    on_quantity: EventHandler<(String, i64)>,
    on_remove: EventHandler<String>,
}

#[component]
fn CartRowView(props: CartRowViewProps) -> Element {
    let item = props.item;
    let currency = props.currency;
    let quantity = i64::from(item.quantity);
    let dec_id = item.id.clone();
    let inc_id = item.id.clone();
    let remove_id = item.id.clone();
    let subtitle = match (&item.category, &item.duration) {
        (Some(category), Some(duration)) => Some(format!("{category} · {duration}")),
        (Some(value), None) | (None, Some(value)) => Some(value.clone()),
        (None, None) => None,
    };

    rsx! {
        tr {
            class: "transition-colors hover:bg-slate-800/40",
            td {
                class: "px-4 py-3",
                p { class: "font-medium text-slate-200", "{item.name}" }
                if let Some(subtitle) = subtitle {
                    p { class: "text-xs {theme::TEXT_MUTED}", "{subtitle}" }
                }
            }
            td { class: "px-4 py-3 text-slate-300", {currency.format_price(item.price)} }
            td {
                class: "px-4 py-3",
                div { class: "flex items-center justify-center gap-2",
                    button {
                        class: "h-6 w-6 rounded border border-slate-700 text-slate-300 hover:bg-slate-800",
                        onclick: move |_| props.on_quantity.call((dec_id.clone(), quantity - 1)),
                        "−"
                    }
                    span { class: "min-w-[2ch] text-center text-slate-200", "{item.quantity}" }
                    button {
                        class: "h-6 w-6 rounded border border-slate-700 text-slate-300 hover:bg-slate-800",
                        onclick: move |_| props.on_quantity.call((inc_id.clone(), quantity + 1)),
                        "+"
                    }
                }
            }
            td { class: "px-4 py-3 text-right font-semibold text-slate-100", {currency.format_price(item.line_total())} }
            td {
                class: "px-4 py-3 text-right",
                button {
                    class: "rounded-md border border-rose-500/40 px-2 py-1 text-[10px] font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                    onclick: move |_| props.on_remove.call(remove_id.clone()),
                    "Remove"
                }
            }
        }
    }
}
