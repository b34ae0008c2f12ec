//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend, or printed by the CLI.

use pems_core::granularity::Granularity;
use pems_core::month_year::MonthYear;
use pems_data::map::{MapExtent, MapMarkers};
use pems_data::FlowProfile;
use serde::Serialize;

/// Station entry for the dropdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationOption {
    pub station_id: i64,
    /// Freeway, direction and name, e.g. "101 N Bascom Ave".
    pub label: String,
}

/// Everything the dashboard renders for one selection state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub station_id: i64,
    /// "Vehicle Flow for Station {id}: {fwy} {dir} {name}"
    pub title: String,
    pub station_label: String,
    pub stations: Vec<StationOption>,
    pub month_years: Vec<MonthYear>,
    pub from: MonthYear,
    pub to: MonthYear,
    /// Tokens the To-select may offer for the current From.
    pub to_options: Vec<MonthYear>,
    pub granularity: Granularity,
    pub flow: FlowProfile,
    pub markers: MapMarkers,
    pub extent: Option<MapExtent>,
}
