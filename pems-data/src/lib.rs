//! Data processing for PeMS flow samples.
//!
//! This crate turns raw per-station flow samples into the time-of-day
//! profile shown on the dashboard, and holds the small pieces of selection
//! logic (month/year options, map marker selection) that the presentation
//! layer drives. Everything here is a pure function of its inputs.

pub mod aggregation;
pub mod map;
pub mod month_year_options;

pub use aggregation::{aggregate, FlowProfile, FlowRow};
