//! Button that applies the map's tapped station to the dropdown.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

pub const MAP_SELECT_LABEL: &str = "Select Station on Map and Click Here!";

#[component]
pub fn MapSelectButton() -> Element {
    let mut state = use_context::<AppState>();

    let on_click = move |_: Event<MouseData>| {
        let hits = js_bridge::read_map_taps();
        log::info!("[QPeMS] map_select_button: applying tap {:?}", hits);
        state.apply(|s| s.tap_map(&hits));
    };

    rsx! {
        button {
            style: "margin: 8px 0; padding: 6px 12px; background: #4CAF50; color: #fff; border: none; border-radius: 4px; cursor: pointer;",
            onclick: on_click,
            "{MAP_SELECT_LABEL}"
        }
    }
}
