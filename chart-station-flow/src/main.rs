//! QPeMS station flow dashboard.
//!
//! Shows the average vehicle flow of one PeMS station by time of day for
//! average weekdays, Saturdays and Sundays, next to a map of all stations.
//!
//! Data flow:
//! 1. `build.rs` copies `sta_detail.csv`, `pems_data.csv` and `monyr.csv`
//!    into `OUT_DIR`.
//! 2. `include_str!` embeds these CSVs into the WASM binary.
//! 3. On mount, the CSVs are loaded into an in-memory SQLite database and a
//!    session is opened on the first station and the full month range.
//! 4. Every control routes its change through the session; the resulting
//!    view drives the chart, the map and the controls themselves.

use anyhow::Context;
use dioxus::prelude::*;
use pems_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, GranularitySelector, LoadingSpinner,
    MapSelectButton, MonthYearRangePicker, StationSelector,
};
use pems_chart_ui::js_bridge;
use pems_chart_ui::state::AppState;
use pems_db::{Database, Session};

const STATIONS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/sta_detail.csv"));
const SAMPLES_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/pems_data.csv"));
/// May be empty; tokens are then derived from the samples.
const MONTH_YEARS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/monyr.csv"));

const PAGE_TITLE: &str = "QPeMS (Quick PeMS: alpha version)";
const CHART_ID: &str = "station-flow-chart";
const MAP_ID: &str = "station-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("station-flow-root"))
        .launch(App);
}

fn open_session() -> anyhow::Result<Session> {
    let db = Database::from_csv(STATIONS_CSV, SAMPLES_CSV, MONTH_YEARS_CSV)
        .context("loading embedded fixtures")?;
    Session::open(db)
}

#[component]
fn App() -> Element {
    web_sys::console::log_1(&"[QPeMS] station-flow App component mounted".into());

    let mut state = use_context_provider(AppState::new);

    // Load fixtures and open this page's session on mount
    use_effect(move || {
        js_bridge::init_charts();
        match open_session() {
            Ok(session) => state.start(session),
            Err(e) => {
                log::error!("[QPeMS] app: failed to open session: {:#}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load PeMS data: {:#}", e)));
                state.loading.set(false);
            }
        }
    });

    // Redraw chart and map whenever the view changes
    use_effect(move || {
        let Some(view) = (state.view)() else {
            return;
        };
        if view.flow.is_empty() {
            log::info!(
                "[QPeMS] app: no flow samples for station {} in {} - {}",
                view.station_id,
                view.from,
                view.to
            );
        }
        js_bridge::render_flow_chart(CHART_ID, &view);
        js_bridge::render_station_map(MAP_ID, &view);
    });

    let view = (state.view)();

    rsx! {
        document::Title { "{PAGE_TITLE}" }
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            if (state.loading)() {
                LoadingSpinner {}
            } else if let Some(view) = view {
                if let Some(err) = (state.error_msg)() {
                    ErrorDisplay { message: err }
                }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
                    StationSelector {}
                    MonthYearRangePicker {}
                    GranularitySelector {}
                }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 24px;",
                    div {
                        style: "flex: 1 1 600px;",
                        ChartHeader {
                            title: view.title.clone(),
                            unit_description: "Total Flow (Vehicles)".to_string(),
                        }
                        ChartContainer {
                            id: CHART_ID.to_string(),
                            min_height: 400,
                        }
                    }
                    div {
                        style: "flex: 0 0 400px;",
                        ChartContainer {
                            id: MAP_ID.to_string(),
                            min_height: 400,
                            width: "400px".to_string(),
                        }
                        MapSelectButton {}
                    }
                }
            } else if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            }
        }
    }
}
