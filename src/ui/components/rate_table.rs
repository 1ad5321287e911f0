use std::cmp::Ordering;

use dioxus::prelude::*;

use crate::domain::{Currency, RateComparison, RateQuote};
use crate::ui::theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SortMode {
    Price,
    Transit,
    Reliability,
}

#[component]
pub fn RateTable(comparison: RateComparison, currency: Currency) -> Element {
    let mut sort_mode = use_signal(|| SortMode::Price);
    let current_sort = sort_mode();

    let is_same = |pick: &Option<RateQuote>, quote: &RateQuote| {
        pick.as_ref()
            .map(|p| p.carrier == quote.carrier)
            .unwrap_or(false)
    };
    let mut rows = comparison
        .quotes
        .iter()
        .map(|quote| {
            let mut tags = Vec::new();
            if is_same(&comparison.cheapest, quote) {
                tags.push("Cheapest");
            }
            if is_same(&comparison.fastest, quote) {
                tags.push("Fastest");
            }
            if is_same(&comparison.best_value, quote) {
                tags.push("Best value");
            }
            (quote.clone(), tags)
        })
        .collect::<Vec<_>>();
    sort_quotes(&mut rows, current_sort);

    rsx! {
        div {
            class: "{theme::TABLE_CONTAINER}",
            div {
                class: "flex items-center justify-between border-b border-slate-800 bg-slate-900/60 px-4 py-2 text-xs text-slate-400",
                span { "{rows.len()} quotes" }
                div { class: "flex gap-2",
                    span { class: "self-center", "Sort by" }
                    for (mode, label) in [(SortMode::Price, "Price"), (SortMode::Transit, "Transit"), (SortMode::Reliability, "Reliability")] {
                        button {
                            class: theme::toggle_button(current_sort == mode),
                            onclick: move |_| sort_mode.set(mode),
                            "{label}"
                        }
                    }
                }
            }
            table {
                class: "min-w-full {theme::TABLE_DIVIDER} text-sm",
                thead {
                    class: "{theme::TABLE_HEADER} text-left tracking-wide",
                    tr {
                        th { class: "px-4 py-3 font-medium", "Carrier" }
                        th { class: "px-4 py-3 font-medium", "Mode" }
                        th { class: "px-4 py-3 font-medium text-right", "Price" }
                        th { class: "px-4 py-3 font-medium text-right", "Transit" }
                        th { class: "px-4 py-3 font-medium text-right", "Reliability" }
                        th { class: "px-4 py-3" }
                    }
                }
                tbody {
                    class: "{theme::TABLE_DIVIDER}",
                    for (quote, tags) in rows {
                        tr {
                            class: row_class(!tags.is_empty()),
                            td { class: "px-4 py-3 font-medium text-slate-200", "{quote.carrier}" }
                            td { class: "px-4 py-3 text-slate-400", "{quote.mode.label()}" }
                            td { class: "px-4 py-3 text-right text-slate-100", {currency.format_price(quote.price_usd)} }
                            td { class: "px-4 py-3 text-right text-slate-300", "{quote.transit_days} d" }
                            td { class: "px-4 py-3 text-right text-slate-300", {format!("{:.0}%", quote.reliability)} }
                            td { class: "px-4 py-3 text-right",
                                for tag in tags.iter() {
                                    span { class: "ml-1 inline-flex rounded-full border border-teal-500/40 bg-teal-500/10 px-2 py-0.5 text-[10px] font-semibold uppercase text-teal-200", "{tag}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn row_class(highlighted: bool) -> &'static str {
    if highlighted {
        "bg-teal-500/5"
    } else {
        "hover:bg-slate-800/40"
    }
}

fn sort_quotes(rows: &mut [(RateQuote, Vec<&'static str>)], mode: SortMode) {
    match mode {
        SortMode::Price => rows.sort_by(|a, b| compare_f64_asc(a.0.price_usd, b.0.price_usd)),
        SortMode::Transit => rows.sort_by(|a, b| {
            a.0.transit_days
                .cmp(&b.0.transit_days)
                .then_with(|| compare_f64_asc(a.0.price_usd, b.0.price_usd))
        }),
        SortMode::Reliability => {
            rows.sort_by(|a, b| compare_f64_asc(b.0.reliability, a.0.reliability))
        }
    }
}

fn compare_f64_asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;

    fn quote(carrier: &str, price: f64, days: u32, reliability: f64) -> (RateQuote, Vec<&'static str>) {
        (
            RateQuote {
                carrier: carrier.into(),
                mode: TransportMode::Ocean,
                price_usd: price,
                transit_days: days,
                reliability,
            },
            Vec::new(),
        )
    }

    fn carriers(rows: &[(RateQuote, Vec<&'static str>)]) -> Vec<String> {
        rows.iter().map(|(q, _)| q.carrier.clone()).collect()
    }

    #[test]
    fn sorts_by_each_mode() {
        let mut rows = vec![
            quote("a", 300.0, 4, 90.0),
            quote("b", 100.0, 30, 80.0),
            quote("c", 200.0, 4, 97.0),
        ];
        sort_quotes(&mut rows, SortMode::Price);
        assert_eq!(carriers(&rows), ["b", "c", "a"]);
        sort_quotes(&mut rows, SortMode::Transit);
        assert_eq!(carriers(&rows), ["c", "a", "b"]);
        sort_quotes(&mut rows, SortMode::Reliability);
        assert_eq!(carriers(&rows), ["c", "a", "b"]);
    }
}
