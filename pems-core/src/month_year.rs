use crate::error::ParseError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Three-letter month abbreviations used in month/year labels ("Jan, 2015").
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month of a given year, used as an inclusive endpoint of the
/// From/To range selection.
///
/// Ordering is chronological (year first, then month). Note that range
/// filtering does **not** use this ordering; see [`MonthYear::compare`].
///
/// Fields are private: every value has a month in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthYear {
    year: i32,
    /// 1 = January, 12 = December
    month: u32,
}

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month/year a calendar date falls in.
    pub fn of_date(date: &NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Canonical display label, e.g. "Jan, 2015".
    pub fn label(&self) -> String {
        format!("{}, {}", MONTH_ABBREVIATIONS[(self.month - 1) as usize], self.year)
    }

    /// Whether `to` may follow `from` in the range selection.
    ///
    /// Month and year are compared independently: `to.month >= from.month`
    /// and `to.year >= from.year`. Feb 2015 therefore does not follow
    /// Dec 2014. Reflexive for every token.
    pub fn compare(from: &MonthYear, to: &MonthYear) -> bool {
        to.month >= from.month && to.year >= from.year
    }

    /// Whether this token passes the range filter `[from, to]`, using the
    /// same component-wise rule as [`MonthYear::compare`] on both ends.
    pub fn within(&self, from: &MonthYear, to: &MonthYear) -> bool {
        self.month >= from.month
            && self.year >= from.year
            && self.month <= to.month
            && self.year <= to.year
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MonthYear {
    type Err = ParseError;

    /// Parse a "Mon, YYYY" label. Whitespace around either part is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::new("month/year", s);
        let (month_str, year_str) = s.split_once(',').ok_or_else(err)?;
        let month_str = month_str.trim();
        let month = MONTH_ABBREVIATIONS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(month_str))
            .ok_or_else(err)? as u32
            + 1;
        let year = year_str.trim().parse::<i32>().map_err(|_| err())?;
        Ok(MonthYear { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::MonthYear;

    fn my(month: u32, year: i32) -> MonthYear {
        MonthYear::new(month, year).unwrap()
    }

    #[test]
    fn label_round_trips_through_from_str() {
        let token = my(1, 2015);
        assert_eq!(token.label(), "Jan, 2015");
        assert_eq!("Jan, 2015".parse::<MonthYear>().unwrap(), token);
        assert_eq!(" dec ,2014 ".parse::<MonthYear>().unwrap(), my(12, 2014));
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("January 2015".parse::<MonthYear>().is_err());
        assert!("Foo, 2015".parse::<MonthYear>().is_err());
        assert!("Jan, twenty".parse::<MonthYear>().is_err());
    }

    #[test]
    fn new_rejects_out_of_range_month() {
        assert!(MonthYear::new(0, 2015).is_none());
        assert!(MonthYear::new(13, 2015).is_none());
        let token = my(12, 2014);
        assert_eq!((token.month(), token.year()), (12, 2014));
    }

    #[test]
    fn every_month_has_a_label() {
        for month in 1..=12 {
            let token = my(month, 2015);
            assert_eq!(token.label().parse::<MonthYear>().unwrap(), token);
        }
    }

    #[test]
    fn compare_is_reflexive() {
        for month in 1..=12 {
            let token = my(month, 2016);
            assert!(MonthYear::compare(&token, &token));
        }
    }

    #[test]
    fn compare_is_component_wise() {
        assert!(MonthYear::compare(&my(3, 2015), &my(5, 2015)));
        assert!(MonthYear::compare(&my(3, 2015), &my(4, 2016)));
        assert!(!MonthYear::compare(&my(5, 2015), &my(3, 2015)));
        // Later chronologically but earlier month: rejected.
        assert!(!MonthYear::compare(&my(12, 2014), &my(2, 2015)));
    }

    #[test]
    fn within_excludes_year_boundary_months() {
        let from = my(12, 2014);
        let to = my(2, 2015);
        assert!(!my(12, 2014).within(&from, &to));
        assert!(!my(1, 2015).within(&from, &to));
        assert!(!my(2, 2015).within(&from, &to));
    }

    #[test]
    fn within_single_month() {
        let token = my(6, 2016);
        assert!(token.within(&token, &token));
        assert!(!my(7, 2016).within(&token, &token));
        assert!(!my(6, 2015).within(&token, &token));
    }

    #[test]
    fn ordering_is_chronological() {
        let mut tokens = vec![my(2, 2015), my(12, 2014), my(1, 2015)];
        tokens.sort();
        assert_eq!(tokens, vec![my(12, 2014), my(1, 2015), my(2, 2015)]);
    }
}
