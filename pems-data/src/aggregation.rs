//! Time-of-day flow profile by day type.
//!
//! Pipeline, per station:
//! 1. parse each sample timestamp (malformed rows are dropped),
//! 2. keep samples whose month/year passes [`MonthYear::within`],
//! 3. resample into midnight-aligned buckets of the chosen granularity,
//!    summing flow; the bucket sequence is contiguous between the first
//!    and last occupied bucket and empty buckets count as 0,
//! 4. drop Monday and Friday buckets, label the rest with a [`DayType`],
//! 5. average the bucket sums per (day type, time of day),
//! 6. pivot to one row per time of day.

use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use pems_core::day_type::DayType;
use pems_core::flow_sample::FlowSample;
use pems_core::granularity::Granularity;
use pems_core::month_year::MonthYear;
use serde::Serialize;
use std::collections::BTreeMap;

/// Average flow at one time of day, per day type. `None` means no bucket
/// of that day type exists at this time of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRow {
    pub time: NaiveTime,
    #[serde(rename = "Avg_Wkday")]
    pub avg_weekday: Option<f64>,
    #[serde(rename = "Sat")]
    pub saturday: Option<f64>,
    #[serde(rename = "Sun")]
    pub sunday: Option<f64>,
}

impl FlowRow {
    fn empty(time: NaiveTime) -> Self {
        Self {
            time,
            avg_weekday: None,
            saturday: None,
            sunday: None,
        }
    }

    pub fn get(&self, day_type: DayType) -> Option<f64> {
        match day_type {
            DayType::AvgWeekday => self.avg_weekday,
            DayType::Saturday => self.saturday,
            DayType::Sunday => self.sunday,
        }
    }

    fn set(&mut self, day_type: DayType, value: f64) {
        match day_type {
            DayType::AvgWeekday => self.avg_weekday = Some(value),
            DayType::Saturday => self.saturday = Some(value),
            DayType::Sunday => self.sunday = Some(value),
        }
    }
}

/// The pivoted flow table, rows ordered by time of day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowProfile {
    pub granularity: Granularity,
    pub rows: Vec<FlowRow>,
}

impl FlowProfile {
    pub fn empty(granularity: Granularity) -> Self {
        Self {
            granularity,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn row_at(&self, time: NaiveTime) -> Option<&FlowRow> {
        self.rows.iter().find(|r| r.time == time)
    }
}

/// Aggregate one station's samples into a [`FlowProfile`].
///
/// `samples` is expected to hold a single station's rows; station ids are
/// not inspected.
pub fn aggregate(
    samples: &[FlowSample],
    from: &MonthYear,
    to: &MonthYear,
    granularity: Granularity,
) -> FlowProfile {
    let mut malformed = 0usize;
    let mut in_range: Vec<(NaiveDateTime, f64)> = Vec::with_capacity(samples.len());
    for sample in samples {
        let dt = match sample.parsed_timestamp() {
            Ok(dt) => dt,
            Err(_) => {
                malformed += 1;
                continue;
            }
        };
        if MonthYear::of_date(&dt.date()).within(from, to) {
            in_range.push((dt, sample.total_flow));
        }
    }
    if malformed > 0 {
        log::warn!(
            "[QPeMS] aggregate: skipped {} samples with malformed timestamps",
            malformed
        );
    }

    let buckets = resample(&in_range, granularity);
    let means = day_type_means(&buckets);
    let profile = pivot(means, granularity);
    log::debug!(
        "[QPeMS] aggregate: {} samples in range -> {} buckets -> {} rows",
        in_range.len(),
        buckets.len(),
        profile.len()
    );
    profile
}

/// Sum flow into midnight-aligned buckets of `granularity`.
///
/// Returns every bucket from the first occupied one to the last occupied
/// one, in order; buckets without samples have a sum of 0.
pub fn resample(
    samples: &[(NaiveDateTime, f64)],
    granularity: Granularity,
) -> Vec<(NaiveDateTime, f64)> {
    let mut sums: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();
    for (dt, flow) in samples {
        *sums.entry(bucket_start(dt, granularity)).or_insert(0.0) += flow;
    }

    let (first, last) = match (sums.keys().next(), sums.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let width = granularity.width();
    let mut buckets = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        buckets.push((cursor, sums.get(&cursor).copied().unwrap_or(0.0)));
        cursor += width;
    }
    buckets
}

/// Start of the bucket containing `dt`.
pub fn bucket_start(dt: &NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    let width_secs = granularity.minutes() * 60;
    let secs = i64::from(dt.num_seconds_from_midnight());
    *dt - TimeDelta::seconds(secs % width_secs) - TimeDelta::nanoseconds(i64::from(dt.nanosecond()))
}

/// Mean bucket sum per (day type, time of day). Monday and Friday buckets
/// are dropped.
pub fn day_type_means(buckets: &[(NaiveDateTime, f64)]) -> BTreeMap<(DayType, NaiveTime), f64> {
    let mut acc: BTreeMap<(DayType, NaiveTime), (f64, u32)> = BTreeMap::new();
    for (start, sum) in buckets {
        let Some(day_type) = DayType::from_weekday(start.weekday()) else {
            continue;
        };
        let entry = acc.entry((day_type, start.time())).or_insert((0.0, 0));
        entry.0 += sum;
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(key, (total, count))| (key, total / f64::from(count)))
        .collect()
}

fn pivot(means: BTreeMap<(DayType, NaiveTime), f64>, granularity: Granularity) -> FlowProfile {
    let mut rows: BTreeMap<NaiveTime, FlowRow> = BTreeMap::new();
    for ((day_type, time), mean) in means {
        rows.entry(time)
            .or_insert_with(|| FlowRow::empty(time))
            .set(day_type, mean);
    }
    FlowProfile {
        granularity,
        rows: rows.into_values().collect(),
    }
}
