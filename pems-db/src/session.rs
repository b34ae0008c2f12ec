//! One user's dashboard session.
//!
//! A [`Session`] owns the current selection (station, From/To month/year,
//! granularity) and shares the read-only [`Database`] with every other
//! session. Each selection change is applied and followed by exactly one
//! synchronous recomputation, returned as a [`DashboardView`].

use crate::models::{DashboardView, StationOption};
use crate::Database;
use anyhow::{anyhow, bail};
use pems_core::granularity::Granularity;
use pems_core::month_year::MonthYear;
use pems_data::map::{MapExtent, MapSelection};
use pems_data::month_year_options::{reconcile_to, to_options};

pub struct Session {
    db: Database,
    stations: Vec<StationOption>,
    month_years: Vec<MonthYear>,
    station_id: i64,
    from: MonthYear,
    to: MonthYear,
    granularity: Granularity,
    map: MapSelection,
}

impl Session {
    /// Start a session on the first selectable station, the full month/year
    /// range and the default granularity.
    ///
    /// Fails when the store has no selectable station or no month/year
    /// token: the dashboard has nothing to show.
    pub fn open(db: Database) -> anyhow::Result<Self> {
        let stations = db.query_station_options()?;
        let month_years = db.query_month_years()?;
        let station_id = stations
            .first()
            .map(|s| s.station_id)
            .ok_or_else(|| anyhow!("no station has both detail and flow samples"))?;
        let (from, to) = match (month_years.first(), month_years.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => bail!("no month/year tokens available"),
        };
        let mut session = Self {
            db,
            stations,
            month_years,
            station_id,
            from,
            to,
            granularity: Granularity::default(),
            map: MapSelection::new(station_id),
        };
        session.reconcile_to();
        log::info!(
            "[QPeMS] session: opened on station {} ({} - {}, {})",
            session.station_id,
            session.from,
            session.to,
            session.granularity
        );
        Ok(session)
    }

    pub fn station_id(&self) -> i64 {
        self.station_id
    }

    pub fn from(&self) -> MonthYear {
        self.from
    }

    pub fn to(&self) -> MonthYear {
        self.to
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn stations(&self) -> &[StationOption] {
        &self.stations
    }

    pub fn month_years(&self) -> &[MonthYear] {
        &self.month_years
    }

    fn is_selectable(&self, station_id: i64) -> bool {
        self.stations.iter().any(|s| s.station_id == station_id)
    }

    fn reconcile_to(&mut self) {
        let options = to_options(&self.month_years, &self.from);
        let to = reconcile_to(&options, &self.to);
        if to != self.to {
            log::info!("[QPeMS] session: To reset from {} to {}", self.to, to);
            self.to = to;
        }
    }

    /// Dropdown change. The map highlight follows.
    pub fn select_station(&mut self, station_id: i64) -> anyhow::Result<DashboardView> {
        if !self.is_selectable(station_id) {
            bail!("station {} is not available", station_id);
        }
        self.station_id = station_id;
        self.map.select(station_id);
        self.view()
    }

    /// From-select change. The To selection is reset to the latest option
    /// if it is no longer offered.
    pub fn select_from(&mut self, from: MonthYear) -> anyhow::Result<DashboardView> {
        if !self.month_years.contains(&from) {
            bail!("month/year {} is not available", from);
        }
        self.from = from;
        self.reconcile_to();
        self.view()
    }

    /// To-select change. A token not offered for the current From is
    /// replaced by the latest offered one.
    pub fn select_to(&mut self, to: MonthYear) -> anyhow::Result<DashboardView> {
        if !self.month_years.contains(&to) {
            bail!("month/year {} is not available", to);
        }
        self.to = to;
        self.reconcile_to();
        self.view()
    }

    pub fn select_granularity(&mut self, granularity: Granularity) -> anyhow::Result<DashboardView> {
        self.granularity = granularity;
        self.view()
    }

    /// Map tap that hit the markers of `hits` (in hit order). Stations that
    /// cannot be selected in the dropdown are ignored; if nothing selectable
    /// was hit, the current station stays selected.
    pub fn tap_map(&mut self, hits: &[i64]) -> anyhow::Result<DashboardView> {
        let selectable: Vec<i64> = hits
            .iter()
            .copied()
            .filter(|id| self.is_selectable(*id))
            .collect();
        self.station_id = self.map.tap(&selectable);
        self.view()
    }

    /// Recompute the view for the current selection.
    pub fn view(&self) -> anyhow::Result<DashboardView> {
        let (title, station_label) = match self.db.query_station(self.station_id)? {
            Some(station) => (station.title(), station.label()),
            None => (format!("Vehicle Flow for Station {}", self.station_id), String::new()),
        };
        let flow =
            self.db
                .query_flow_profile(self.station_id, &self.from, &self.to, self.granularity)?;
        let markers = self.db.query_map_markers(self.station_id)?;
        let extent = MapExtent::around(&markers.all);
        log::info!(
            "[QPeMS] session: station {} {} - {} at {} -> {} rows",
            self.station_id,
            self.from,
            self.to,
            self.granularity,
            flow.len()
        );
        Ok(DashboardView {
            station_id: self.station_id,
            title,
            station_label,
            stations: self.stations.clone(),
            month_years: self.month_years.clone(),
            from: self.from,
            to: self.to,
            to_options: to_options(&self.month_years, &self.from),
            granularity: self.granularity,
            flow,
            markers,
            extent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS_CSV: &str = "\
ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude
400001,101,N,ML,4,Bascom Ave,37.36,-121.90
400017,880,S,ML,3,Stevens Creek,37.32,-121.93
400030,280,N,ML,4,Winchester,37.31,-121.95
";

    const MONTH_YEARS_CSV: &str = "m,year\n11,2014\n12,2014\n1,2015\n2,2015\n";

    fn my(month: u32, year: i32) -> MonthYear {
        MonthYear::new(month, year).unwrap()
    }

    fn sample_db() -> Database {
        let mut samples = String::from("Station,Timestamp,Total_Flow\n");
        for station in [400001, 400017] {
            for h in 0..24 {
                samples.push_str(&format!("{},01/06/2015 {:02}:00:00,100\n", station, h));
            }
        }
        Database::from_csv(STATIONS_CSV, &samples, MONTH_YEARS_CSV).unwrap()
    }

    #[test]
    fn opens_on_first_station_and_full_range() {
        let session = Session::open(sample_db()).unwrap();
        assert_eq!(session.station_id(), 400001);
        assert_eq!(session.from(), my(11, 2014));
        // Feb 2015 does not follow Nov 2014 component-wise; To falls back
        // to the latest offered token.
        assert_eq!(session.to(), my(12, 2014));
        assert_eq!(session.granularity(), Granularity::OneHour);
        // 400030 has no samples.
        assert_eq!(session.stations().len(), 2);
    }

    #[test]
    fn open_fails_without_data() {
        let db = Database::new().unwrap();
        assert!(Session::open(db).is_err());
    }

    #[test]
    fn view_carries_title_markers_and_flow() {
        let mut session = Session::open(sample_db()).unwrap();
        session.select_from(my(1, 2015)).unwrap();
        let view = session.select_to(my(1, 2015)).unwrap();
        assert_eq!(view.title, "Vehicle Flow for Station 400001: 101 N Bascom Ave");
        assert_eq!(view.station_label, "101 N Bascom Ave");
        assert_eq!(view.markers.all.len(), 3);
        assert_eq!(view.markers.selected.unwrap().station_id, 400001);
        assert_eq!(view.flow.len(), 24);
        assert!(view.flow.rows.iter().all(|r| r.avg_weekday == Some(100.0)));
        assert!(view.extent.is_some());
    }

    #[test]
    fn changing_from_resets_invalid_to() {
        let mut session = Session::open(sample_db()).unwrap();
        session.select_from(my(1, 2015)).unwrap();
        let view = session.select_to(my(1, 2015)).unwrap();
        assert_eq!(view.to, my(1, 2015));

        let view = session.select_from(my(2, 2015)).unwrap();
        assert_eq!(view.to_options, vec![my(2, 2015)]);
        assert_eq!(view.to, my(2, 2015));
    }

    #[test]
    fn changing_from_keeps_valid_to() {
        let mut session = Session::open(sample_db()).unwrap();
        session.select_from(my(1, 2015)).unwrap();
        session.select_to(my(2, 2015)).unwrap();
        let view = session.select_from(my(1, 2015)).unwrap();
        assert_eq!(view.to, my(2, 2015));
        assert!(view.to_options.contains(&view.from));
    }

    #[test]
    fn to_outside_options_falls_back_to_latest() {
        let mut session = Session::open(sample_db()).unwrap();
        session.select_from(my(12, 2014)).unwrap();
        let view = session.select_to(my(1, 2015)).unwrap();
        assert_eq!(view.to, my(12, 2014));
    }

    #[test]
    fn unknown_tokens_and_stations_are_rejected() {
        let mut session = Session::open(sample_db()).unwrap();
        assert!(session.select_from(my(6, 2020)).is_err());
        assert!(session.select_to(my(6, 2020)).is_err());
        assert!(session.select_station(400030).is_err());
        assert!(session.select_station(1).is_err());
        assert_eq!(session.station_id(), 400001);
        assert_eq!(session.from(), my(11, 2014));
    }

    #[test]
    fn empty_map_tap_keeps_selected_station() {
        let mut session = Session::open(sample_db()).unwrap();
        session.select_station(400017).unwrap();
        let view = session.tap_map(&[]).unwrap();
        assert_eq!(view.station_id, 400017);
        assert_eq!(view.markers.selected.unwrap().station_id, 400017);
    }

    #[test]
    fn map_tap_updates_dropdown_station() {
        let mut session = Session::open(sample_db()).unwrap();
        let view = session.tap_map(&[400017, 400001]).unwrap();
        assert_eq!(view.station_id, 400017);
        assert_eq!(session.station_id(), 400017);
        assert!(view.title.contains("Stevens Creek"));
    }

    #[test]
    fn map_tap_ignores_unselectable_stations() {
        let mut session = Session::open(sample_db()).unwrap();
        let view = session.tap_map(&[400030]).unwrap();
        assert_eq!(view.station_id, 400001);
    }

    #[test]
    fn granularity_change_recomputes() {
        let mut session = Session::open(sample_db()).unwrap();
        session.select_from(my(1, 2015)).unwrap();
        session.select_to(my(1, 2015)).unwrap();
        let view = session.select_granularity(Granularity::FifteenMinutes).unwrap();
        assert_eq!(view.granularity, Granularity::FifteenMinutes);
        // Hourly samples land in the :00 bucket; :15/:30/:45 are zero-filled.
        assert_eq!(view.flow.len(), 96 - 3);
    }

    #[test]
    fn sessions_share_store_but_not_selection() {
        let db = sample_db();
        let mut a = Session::open(db.clone()).unwrap();
        let b = Session::open(db).unwrap();
        a.select_station(400017).unwrap();
        assert_eq!(a.station_id(), 400017);
        assert_eq!(b.station_id(), 400001);
    }

    #[test]
    fn station_without_location_stays_off_the_map() {
        let stations = format!("{}400045,87,S,ML,2,Julian St,,\n", STATIONS_CSV);
        let samples = "Station,Timestamp,Total_Flow\n400001,01/06/2015 00:00:00,100\n";
        let db = Database::from_csv(&stations, samples, MONTH_YEARS_CSV).unwrap();
        let view = Session::open(db).unwrap().view().unwrap();
        assert_eq!(view.markers.all.len(), 3);
        let extent = view.extent.unwrap();
        assert_eq!(extent, MapExtent::around(&view.markers.all).unwrap());
        assert!(extent.x_end - extent.x_start < 200_000.0);
        assert!(extent.y_end - extent.y_start < 200_000.0);
    }

    #[test]
    fn view_serializes_for_the_chart() {
        let session = Session::open(sample_db()).unwrap();
        let json = serde_json::to_value(session.view().unwrap()).unwrap();
        assert_eq!(json["station_id"], 400001);
        assert_eq!(json["granularity"], "1H");
        assert!(json["flow"]["rows"].is_array());
    }
}
