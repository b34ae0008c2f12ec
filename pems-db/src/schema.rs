//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `stations` - one row per detector station, keyed by the integer PeMS id
/// - `flow_samples` - raw samples; timestamps stay as text
///   (`MM/DD/YYYY HH:MM:SS`) and are parsed during aggregation. No primary
///   key: duplicate readings are kept and summed like any other.
/// - `month_years` - the month/year tokens offered in the range selectors
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS stations (
        station_id INTEGER PRIMARY KEY,
        freeway TEXT NOT NULL,
        direction TEXT NOT NULL,
        station_type TEXT NOT NULL,
        lanes INTEGER NOT NULL,
        name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        x REAL NOT NULL,
        y REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS flow_samples (
        station_id INTEGER NOT NULL,
        timestamp TEXT NOT NULL,
        total_flow REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_flow_station ON flow_samples(station_id);

    CREATE TABLE IF NOT EXISTS month_years (
        year INTEGER NOT NULL,
        month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
        PRIMARY KEY (year, month)
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in &["stations", "flow_samples", "month_years"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn station_lookup_uses_index() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let plan: String = conn
            .query_row(
                "EXPLAIN QUERY PLAN SELECT timestamp, total_flow FROM flow_samples WHERE station_id = 1",
                [],
                |row| row.get(3),
            )
            .unwrap();
        assert!(
            plan.contains("idx_flow_station"),
            "Station filter should use the index, got: {}",
            plan
        );
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
