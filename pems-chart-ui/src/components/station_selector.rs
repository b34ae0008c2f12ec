//! Dropdown selector for choosing a station.

use crate::state::AppState;
use dioxus::prelude::*;

/// Station dropdown. Lists every station that has both detail and flow
/// samples; the selected entry follows map taps as well.
#[component]
pub fn StationSelector() -> Element {
    let mut state = use_context::<AppState>();
    let Some(view) = state.view.read().clone() else {
        return rsx! {};
    };

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<i64>() {
        Ok(station_id) => state.apply(|s| s.select_station(station_id)),
        Err(_) => log::warn!("[QPeMS] station_selector: bad value {:?}", evt.value()),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Station: "
            }
            select {
                id: "station-select",
                onchange: on_change,
                for station in view.stations.iter() {
                    option {
                        value: "{station.station_id}",
                        selected: station.station_id == view.station_id,
                        "{station.station_id} - {station.label}"
                    }
                }
            }
        }
    }
}
