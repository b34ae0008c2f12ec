//! Typed query methods for retrieving station and flow data.
//!
//! Reference tables (stations, month/year tokens) are read in full; flow
//! samples are only ever read for one station at a time.

use crate::models::StationOption;
use crate::Database;
use pems_core::flow_sample::{parse_timestamp, FlowSample};
use pems_core::granularity::Granularity;
use pems_core::month_year::MonthYear;
use pems_core::station::Station;
use pems_data::map::{MapMarker, MapMarkers};
use pems_data::FlowProfile;
use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeSet;

const STATION_COLUMNS: &str =
    "station_id, freeway, direction, station_type, lanes, name, latitude, longitude, x, y";

fn station_from_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    Ok(Station {
        id: row.get(0)?,
        freeway: row.get(1)?,
        direction: row.get(2)?,
        station_type: row.get(3)?,
        lanes: row.get(4)?,
        name: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
        x: row.get(8)?,
        y: row.get(9)?,
    })
}

impl Database {
    // ───────────────────── Station Queries ─────────────────────

    /// Get every station in the detail table, ordered by id.
    pub fn query_stations(&self) -> anyhow::Result<Vec<Station>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM stations ORDER BY station_id",
            STATION_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], station_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[QPeMS] query: query_stations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get one station's detail, if it exists.
    pub fn query_station(&self, station_id: i64) -> anyhow::Result<Option<Station>> {
        let conn = self.conn.borrow();
        let station = conn
            .query_row(
                &format!(
                    "SELECT {} FROM stations WHERE station_id = ?1",
                    STATION_COLUMNS
                ),
                params![station_id],
                station_from_row,
            )
            .optional()?;
        Ok(station)
    }

    /// Get the selectable stations: those present both in the sample table
    /// and in the detail table, ordered by id.
    pub fn query_station_options(&self) -> anyhow::Result<Vec<StationOption>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM stations
             WHERE station_id IN (SELECT DISTINCT station_id FROM flow_samples)
             ORDER BY station_id",
            STATION_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], station_from_row)?
            .map(|r| {
                r.map(|s| StationOption {
                    station_id: s.id,
                    label: s.label(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[QPeMS] query: query_station_options returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    // ───────────────────── Flow Queries ─────────────────────

    /// Get all raw samples of one station, in load order.
    ///
    /// An unknown station yields an empty vector.
    pub fn query_station_samples(&self, station_id: i64) -> anyhow::Result<Vec<FlowSample>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT station_id, timestamp, total_flow FROM flow_samples
             WHERE station_id = ?1
             ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map(params![station_id], |row| {
                Ok(FlowSample {
                    station_id: row.get(0)?,
                    timestamp: row.get(1)?,
                    total_flow: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[QPeMS] query: query_station_samples({}) returned {} records",
            station_id,
            rows.len()
        );
        Ok(rows)
    }

    /// Get the time-of-day flow profile of one station.
    ///
    /// See [`pems_data::aggregation`] for the pipeline. An unknown station
    /// yields an empty profile.
    pub fn query_flow_profile(
        &self,
        station_id: i64,
        from: &MonthYear,
        to: &MonthYear,
        granularity: Granularity,
    ) -> anyhow::Result<FlowProfile> {
        let samples = self.query_station_samples(station_id)?;
        Ok(pems_data::aggregate(&samples, from, to, granularity))
    }

    // ───────────────────── Month/Year Queries ─────────────────────

    /// Get the available month/year tokens in chronological order.
    ///
    /// Reads the `month_years` table; when it is empty the tokens are
    /// derived from the distinct months present in the samples instead.
    pub fn query_month_years(&self) -> anyhow::Result<Vec<MonthYear>> {
        let rows = {
            let conn = self.conn.borrow();
            let mut stmt =
                conn.prepare("SELECT month, year FROM month_years ORDER BY year, month")?;
            let pairs = stmt
                .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, i32>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            pairs
                .into_iter()
                .filter_map(|(month, year)| MonthYear::new(month, year))
                .collect::<Vec<_>>()
        };
        if !rows.is_empty() {
            log::info!(
                "[QPeMS] query: query_month_years returned {} records",
                rows.len()
            );
            return Ok(rows);
        }
        self.derive_month_years()
    }

    /// Distinct month/year tokens of all sample timestamps, chronological.
    /// Timestamps are parsed exactly as aggregation parses them; malformed
    /// ones are ignored.
    pub fn derive_month_years(&self) -> anyhow::Result<Vec<MonthYear>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT timestamp FROM flow_samples")?;
        let timestamps = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        let tokens: BTreeSet<MonthYear> = timestamps
            .iter()
            .filter_map(|ts| parse_timestamp(ts).ok())
            .map(|dt| MonthYear::of_date(&dt.date()))
            .collect();
        log::info!(
            "[QPeMS] query: derive_month_years found {} tokens in {} sample timestamps",
            tokens.len(),
            timestamps.len()
        );
        Ok(tokens.into_iter().collect())
    }

    // ───────────────────── Map Queries ─────────────────────

    /// Get map markers for every station, marking `selected_station`.
    pub fn query_map_markers(&self, selected_station: i64) -> anyhow::Result<MapMarkers> {
        let all: Vec<MapMarker> = self.query_stations()?.iter().map(MapMarker::from).collect();
        Ok(MapMarkers::new(all, selected_station))
    }
}
