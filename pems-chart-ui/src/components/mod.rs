//! Reusable Dioxus RSX components for the QPeMS dashboard.

mod chart_container;
mod chart_header;
mod error_display;
mod granularity_selector;
mod loading_spinner;
mod map_select_button;
mod month_year_range_picker;
mod station_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use granularity_selector::GranularitySelector;
pub use loading_spinner::LoadingSpinner;
pub use map_select_button::MapSelectButton;
pub use month_year_range_picker::MonthYearRangePicker;
pub use station_selector::StationSelector;
