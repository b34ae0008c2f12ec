//! Station map: marker data, plot extent, and the dropdown/map selection
//! linkage.

use pems_core::station::Station;
use serde::Serialize;

/// Padding added around the station bounding box, in Web Mercator metres.
pub const MAP_PADDING_X: f64 = 30_000.0;
pub const MAP_PADDING_Y: f64 = 20_000.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MapMarker {
    pub station_id: i64,
    pub x: f64,
    pub y: f64,
}

impl From<&Station> for MapMarker {
    fn from(station: &Station) -> Self {
        Self {
            station_id: station.id,
            x: station.x,
            y: station.y,
        }
    }
}

/// Every station marker plus the one currently selected.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMarkers {
    pub all: Vec<MapMarker>,
    pub selected: Option<MapMarker>,
}

impl MapMarkers {
    pub fn new(all: Vec<MapMarker>, selected_station: i64) -> Self {
        let selected = all.iter().find(|m| m.station_id == selected_station).copied();
        Self { all, selected }
    }
}

/// Visible map range.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MapExtent {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl MapExtent {
    /// Bounding box of `markers` padded by [`MAP_PADDING_X`] / [`MAP_PADDING_Y`].
    pub fn around(markers: &[MapMarker]) -> Option<Self> {
        let first = markers.first()?;
        let mut extent = MapExtent {
            x_start: first.x,
            x_end: first.x,
            y_start: first.y,
            y_end: first.y,
        };
        for m in &markers[1..] {
            extent.x_start = extent.x_start.min(m.x);
            extent.x_end = extent.x_end.max(m.x);
            extent.y_start = extent.y_start.min(m.y);
            extent.y_end = extent.y_end.max(m.y);
        }
        extent.x_start -= MAP_PADDING_X;
        extent.x_end += MAP_PADDING_X;
        extent.y_start -= MAP_PADDING_Y;
        extent.y_end += MAP_PADDING_Y;
        Some(extent)
    }
}

/// The single station selected on the map.
///
/// A tap hitting several markers keeps the first; a tap hitting nothing
/// re-selects the station that was already active, so there is always
/// exactly one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSelection {
    active: i64,
}

impl MapSelection {
    pub fn new(station_id: i64) -> Self {
        Self { active: station_id }
    }

    pub fn active(&self) -> i64 {
        self.active
    }

    /// Follow a dropdown change.
    pub fn select(&mut self, station_id: i64) {
        self.active = station_id;
    }

    /// Apply a map tap that hit the markers of `hits` (station ids, in hit
    /// order). Returns the station now selected.
    pub fn tap(&mut self, hits: &[i64]) -> i64 {
        if let Some(first) = hits.first() {
            self.active = *first;
        }
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(station_id: i64, x: f64, y: f64) -> MapMarker {
        MapMarker { station_id, x, y }
    }

    #[test]
    fn empty_tap_keeps_previous_station() {
        let mut selection = MapSelection::new(400001);
        selection.select(400017);
        assert_eq!(selection.tap(&[]), 400017);
        assert_eq!(selection.active(), 400017);
    }

    #[test]
    fn multi_hit_tap_keeps_first() {
        let mut selection = MapSelection::new(400001);
        assert_eq!(selection.tap(&[400030, 400017]), 400030);
    }

    #[test]
    fn markers_mark_selected_station() {
        let all = vec![marker(1, 0.0, 0.0), marker(2, 10.0, 5.0)];
        let markers = MapMarkers::new(all.clone(), 2);
        assert_eq!(markers.selected, Some(all[1]));
        assert_eq!(MapMarkers::new(all, 3).selected, None);
    }

    #[test]
    fn extent_pads_bounding_box() {
        let extent = MapExtent::around(&[
            marker(1, -100.0, 50.0),
            marker(2, 200.0, -25.0),
        ])
        .unwrap();
        assert_eq!(extent.x_start, -100.0 - MAP_PADDING_X);
        assert_eq!(extent.x_end, 200.0 + MAP_PADDING_X);
        assert_eq!(extent.y_start, -25.0 - MAP_PADDING_Y);
        assert_eq!(extent.y_end, 50.0 + MAP_PADDING_Y);
        assert!(MapExtent::around(&[]).is_none());
    }
}
