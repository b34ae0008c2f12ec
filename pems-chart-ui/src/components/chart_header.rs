//! Chart header component with title and Y-axis unit.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// e.g. "Vehicle Flow for Station 400001: 101 N Bascom Ave"
    pub title: String,
    #[props(default = String::new())]
    pub unit_description: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.unit_description.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "Y-axis: {props.unit_description}"
                }
            }
        }
    }
}
