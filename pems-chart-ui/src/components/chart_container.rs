//! Container div that D3 renders a chart or the station map into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id passed to the D3 render function
    pub id: String,
    #[props(default = 400)]
    pub min_height: u32,
    /// CSS width, e.g. "100%" for the chart or "400px" for the map
    #[props(default = "100%".to_string())]
    pub width: String,
}

#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: {};",
        props.min_height, props.width
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
