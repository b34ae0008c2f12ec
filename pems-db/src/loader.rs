//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude,x,y`
//! - **Flow samples** (has headers): `Station,Timestamp,Total_Flow`
//! - **Month/year tokens** (has headers): `m,year`

use crate::Database;
use pems_core::station::Station;
use rusqlite::params;

impl Database {
    /// Load station detail from CSV string.
    ///
    /// Parsing is delegated to [`Station::parse_station_csv`]; missing map
    /// coordinates are projected from latitude/longitude there.
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let stations = Station::parse_station_csv(csv_data)?;
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "INSERT OR REPLACE INTO stations
             (station_id, freeway, direction, station_type, lanes, name, latitude, longitude, x, y)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for s in &stations {
            stmt.execute(params![
                s.id,
                s.freeway,
                s.direction,
                s.station_type,
                s.lanes,
                s.name,
                s.latitude,
                s.longitude,
                s.x,
                s.y
            ])?;
        }
        log::info!("[QPeMS] loader: Loaded {} stations", stations.len());
        Ok(())
    }

    /// Load raw flow samples from CSV string.
    ///
    /// Rows with a non-integer station id or an unreadable flow are skipped.
    /// A blank or `NaN` flow (PeMS leaves flow blank when a detector reports
    /// nothing) is stored as 0 so its timestamp still spans the resampled
    /// buckets. Timestamps are stored as-is; a malformed one only drops that
    /// row at aggregation.
    ///
    /// # Example CSV
    /// ```text
    /// Station,Timestamp,Total_Flow
    /// 400001,01/06/2015 08:00:00,120
    /// 400001,01/06/2015 08:05:00,
    /// ```
    pub fn load_flow_samples(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let tx = conn.unchecked_transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flow_samples (station_id, timestamp, total_flow)
                 VALUES (?1, ?2, ?3)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let station_id = match r.get(0).unwrap_or("").trim().parse::<i64>() {
                    Ok(id) => id,
                    Err(_) => { skipped += 1; continue; }
                };
                let timestamp = r.get(1).unwrap_or("").trim();
                let flow = r.get(2).unwrap_or("").trim();
                let total_flow = if flow.is_empty() || flow.eq_ignore_ascii_case("nan") {
                    0.0
                } else {
                    match flow.parse::<f64>() {
                        Ok(v) if v.is_finite() => v,
                        _ => { skipped += 1; continue; }
                    }
                };
                if timestamp.is_empty() {
                    skipped += 1;
                    continue;
                }

                stmt.execute(params![station_id, timestamp, total_flow])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "[QPeMS] loader: Loaded {} flow samples, skipped {} invalid",
            count,
            skipped
        );
        Ok(())
    }

    /// Load month/year tokens from CSV string (`m,year`, with headers).
    ///
    /// Rows with a month outside 1..=12 are skipped.
    pub fn load_month_years(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let month: u32 = r.get(0).unwrap_or("").trim().parse()?;
            let year: i32 = r.get(1).unwrap_or("").trim().parse()?;
            if !(1..=12).contains(&month) {
                log::warn!("[QPeMS] loader: skipping month/year {}/{}", month, year);
                continue;
            }
            conn.execute(
                "INSERT OR IGNORE INTO month_years (year, month) VALUES (?1, ?2)",
                params![year, month],
            )?;
            count += 1;
        }
        log::info!("[QPeMS] loader: Loaded {} month/year tokens", count);
        Ok(())
    }
}
