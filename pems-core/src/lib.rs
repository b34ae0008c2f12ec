pub mod day_type;
pub mod error;
pub mod flow_sample;
pub mod granularity;
pub mod month_year;
pub mod station;
