//! Bucket width selector.

use crate::state::AppState;
use dioxus::prelude::*;
use pems_core::granularity::Granularity;

#[component]
pub fn GranularitySelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.view.read().as_ref().map(|v| v.granularity).unwrap_or_default();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<Granularity>() {
        Ok(granularity) => state.apply(|s| s.select_granularity(granularity)),
        Err(e) => log::warn!("[QPeMS] granularity_selector: {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "granularity-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Granularity: "
            }
            select {
                id: "granularity-select",
                onchange: on_change,
                for granularity in Granularity::ALL {
                    option {
                        value: "{granularity}",
                        selected: granularity == current,
                        "{granularity}"
                    }
                }
            }
        }
    }
}
