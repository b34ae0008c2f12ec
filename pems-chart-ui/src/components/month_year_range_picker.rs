//! From/To month-year selectors.

use crate::state::AppState;
use dioxus::prelude::*;
use pems_core::month_year::MonthYear;

/// From lists every token; To only lists the tokens offered for the
/// current From.
#[component]
pub fn MonthYearRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let Some(view) = state.view.read().clone() else {
        return rsx! {};
    };

    let on_from_change = move |evt: Event<FormData>| match evt.value().parse::<MonthYear>() {
        Ok(from) => state.apply(|s| s.select_from(from)),
        Err(e) => log::warn!("[QPeMS] range_picker: {}", e),
    };

    let on_to_change = move |evt: Event<FormData>| match evt.value().parse::<MonthYear>() {
        Ok(to) => state.apply(|s| s.select_to(to)),
        Err(e) => log::warn!("[QPeMS] range_picker: {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                select {
                    onchange: on_from_change,
                    for token in view.month_years.iter() {
                        option {
                            value: "{token}",
                            selected: *token == view.from,
                            "{token}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                select {
                    onchange: on_to_change,
                    for token in view.to_options.iter() {
                        option {
                            value: "{token}",
                            selected: *token == view.to,
                            "{token}"
                        }
                    }
                }
            }
        }
    }
}
