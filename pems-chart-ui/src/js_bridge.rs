//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3 chart functions live in `assets/js/*.js`, are embedded at compile
//! time and evaluated as globals (no ES modules) once D3 is available.

use pems_core::day_type::DayType;
use pems_db::models::DashboardView;
use serde_json::json;

static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static FLOW_CHART_JS: &str = include_str!("../assets/js/flow-chart.js");
static STATION_MAP_JS: &str = include_str!("../assets/js/station-map.js");

const D3_URL: &str = "https://d3js.org/d3.v7.min.js";

/// Line colors per day type: blue weekday, green Saturday, red Sunday.
pub fn day_type_color(day_type: DayType) -> &'static str {
    match day_type {
        DayType::AvgWeekday => "#1f77b4",
        DayType::Saturday => "#2ca02c",
        DayType::Sunday => "#d62728",
    }
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('[QPeMS] JS call failed:', e); }}",
        code
    );
    if let Err(e) = js_sys::eval(&wrapped) {
        log::warn!("[QPeMS] js_bridge: eval failed: {:?}", e);
    }
}

/// Inject D3 if the host page did not, then evaluate the chart scripts at
/// global scope once `d3` is defined. Call once at app startup.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, FLOW_CHART_JS, STATION_MAP_JS].join("\n");
    let scripts = serde_json::to_string(&all_js).unwrap_or_default();
    call_js(&format!(
        r#"
        window.__pemsChartScripts = {scripts};
        if (typeof d3 === 'undefined' && !document.getElementById('pems-d3')) {{
            var s = document.createElement('script');
            s.id = 'pems-d3';
            s.src = '{D3_URL}';
            document.head.appendChild(s);
        }}
        (function() {{
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined' && window.__pemsChartScripts) {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__pemsChartScripts);
                    delete window.__pemsChartScripts;
                    window.renderFlowChart = renderFlowChart;
                    window.renderStationMap = renderStationMap;
                    window.initTooltip = initTooltip;
                    window.showTooltip = showTooltip;
                    window.hideTooltip = hideTooltip;
                    window.__pemsChartsReady = true;
                    console.log('[QPeMS] charts initialized');
                }}
            }}, 100);
        }})();
        "#
    ));
}

/// Quote a JSON payload as a single-quoted JS string literal body.
fn escape_js_arg(json: &str) -> String {
    json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "")
}

/// Call `window.{function}(container, data, config)` once the chart scripts
/// are ready and the container exists in the DOM.
fn render_when_ready(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    let data = escape_js_arg(data_json);
    let config = escape_js_arg(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__pemsChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', '{data}', '{config}');
                    }} catch(e) {{ console.error('[QPeMS] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

pub fn flow_chart_config(view: &DashboardView) -> serde_json::Value {
    let series: Vec<serde_json::Value> = DayType::ALL
        .iter()
        .map(|d| {
            json!({
                "column": d.column(),
                "legend": d.legend(),
                "color": day_type_color(*d),
            })
        })
        .collect();
    json!({
        "title": view.title,
        "xAxisLabel": "Time of Day",
        "yAxisLabel": "Total Flow (Vehicles)",
        "granularity": view.granularity,
        "series": series,
    })
}

pub fn station_map_data(view: &DashboardView) -> serde_json::Value {
    json!({
        "markers": view.markers.all,
        "selected": view.markers.selected,
        "extent": view.extent,
    })
}

/// Render the time-of-day flow chart of `view`.
pub fn render_flow_chart(container_id: &str, view: &DashboardView) {
    let data = serde_json::to_string(&view.flow.rows).unwrap_or_default();
    let config = flow_chart_config(view).to_string();
    render_when_ready("renderFlowChart", container_id, &data, &config);
}

/// Render the station map of `view`, highlighting the selected station.
pub fn render_station_map(container_id: &str, view: &DashboardView) {
    let data = station_map_data(view).to_string();
    let config = json!({
        "markerColor": "#1f77b4",
        "selectedColor": "#d62728",
    })
    .to_string();
    render_when_ready("renderStationMap", container_id, &data, &config);
}

/// Station ids hit by the latest map tap, in hit order.
pub fn read_map_taps() -> Vec<i64> {
    match js_sys::eval("JSON.stringify(window.__pemsMapTaps || [])") {
        Ok(value) => value.as_string().map(|s| parse_taps(&s)).unwrap_or_default(),
        Err(e) => {
            log::warn!("[QPeMS] js_bridge: reading map taps failed: {:?}", e);
            Vec::new()
        }
    }
}

fn parse_taps(json: &str) -> Vec<i64> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("[QPeMS] js_bridge: bad map tap payload {:?}: {}", json, e);
        Vec::new()
    })
}
