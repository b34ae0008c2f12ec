use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// The bucket a resampled flow value is averaged into.
///
/// Only Tuesday, Wednesday and Thursday feed the weekday average; Monday and
/// Friday map to no bucket at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayType {
    #[serde(rename = "Avg_Wkday")]
    AvgWeekday,
    #[serde(rename = "Sat")]
    Saturday,
    #[serde(rename = "Sun")]
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::AvgWeekday, DayType::Saturday, DayType::Sunday];

    pub fn from_weekday(weekday: Weekday) -> Option<DayType> {
        match weekday {
            Weekday::Tue | Weekday::Wed | Weekday::Thu => Some(DayType::AvgWeekday),
            Weekday::Sat => Some(DayType::Saturday),
            Weekday::Sun => Some(DayType::Sunday),
            Weekday::Mon | Weekday::Fri => None,
        }
    }

    /// Column name of this bucket in the pivoted flow table.
    pub fn column(&self) -> &'static str {
        match self {
            DayType::AvgWeekday => "Avg_Wkday",
            DayType::Saturday => "Sat",
            DayType::Sunday => "Sun",
        }
    }

    /// Legend label shown next to the chart line.
    pub fn legend(&self) -> &'static str {
        match self {
            DayType::AvgWeekday => "Avg. Wkday",
            DayType::Saturday => "Saturday",
            DayType::Sunday => "Sunday",
        }
    }
}
