//! In-memory SQLite store for PeMS flow data.
//!
//! The dashboard's backing data is static: a station detail table, a
//! month/year token table and a large table of raw flow samples. This crate
//! loads them from CSV into an in-memory SQLite database and exposes typed,
//! read-only queries, plus the [`Session`] that turns a user's selections
//! into the three results the dashboard renders.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - CSV data loaded via `include_str!` at compile time in the web app, or
//!   read from disk by the CLI
//! - Samples are indexed by station id so a station query never scans the
//!   whole table
//!
//! # Usage
//!
//! ```rust
//! use pems_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude\n400001,101,N,ML,4,Bascom Ave,37.36,-121.90\n").unwrap();
//! db.load_flow_samples("Station,Timestamp,Total_Flow\n400001,01/06/2015 08:00:00,120\n").unwrap();
//!
//! let samples = db.query_station_samples(400001).unwrap();
//! assert_eq!(samples.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `stations` - station detail (freeway, direction, name, coordinates)
//! - `flow_samples` - raw per-interval vehicle counts
//! - `month_years` - available month/year tokens

pub mod schema;
mod loader;
mod queries;
pub mod models;
pub mod session;

pub use session::Session;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding PeMS station and flow data.
///
/// Cheaply cloneable (via `Rc`): every dashboard session shares one
/// read-only copy of the data.
///
/// # Example
///
/// ```rust
/// use pems_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_stations("ID,Fwy,Dir,Type,Lanes,Name,Latitude,Longitude\n400001,101,N,ML,4,Bascom Ave,37.36,-121.90\n").unwrap();
/// let stations = db.query_stations().unwrap();
/// assert_eq!(stations.len(), 1);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database and load all three fixtures in one go.
    ///
    /// `month_years_csv` may be empty; the tokens are then derived from the
    /// samples on query.
    pub fn from_csv(
        stations_csv: &str,
        samples_csv: &str,
        month_years_csv: &str,
    ) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_stations(stations_csv)?;
        db.load_flow_samples(samples_csv)?;
        if !month_years_csv.trim().is_empty() {
            db.load_month_years(month_years_csv)?;
        }
        Ok(db)
    }
}
