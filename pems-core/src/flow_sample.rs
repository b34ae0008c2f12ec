use crate::error::ParseError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format of PeMS sample rows: "MM/DD/YYYY HH:MM:SS".
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// A single raw flow reading as stored: the timestamp is kept as text and
/// only parsed during aggregation, so one bad row cannot fail a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSample {
    pub station_id: i64,
    pub timestamp: String,
    /// Vehicles counted during the sampling interval.
    pub total_flow: f64,
}

impl FlowSample {
    pub fn new(station_id: i64, timestamp: &str, total_flow: f64) -> Self {
        Self {
            station_id,
            timestamp: timestamp.to_string(),
            total_flow,
        }
    }

    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, ParseError> {
        parse_timestamp(&self.timestamp)
    }
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::new("timestamp", s))
}
