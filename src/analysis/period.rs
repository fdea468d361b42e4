//! Named reporting periods
//!
//! Periods resolve against an explicit `today` so results are reproducible.

use chrono::{Datelike, Duration, Months, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Period names accepted by `--period`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamedPeriod {
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
}

/// Inclusive date range with a display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl NamedPeriod {
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        match self {
            Self::ThisMonth => {
                let start = first_of_month(today);
                DateRange::new(start, last_of_month(today), month_label(start))
            }
            Self::LastMonth => {
                let start = months_before(first_of_month(today), 1);
                DateRange::new(start, last_of_month(start), month_label(start))
            }
            Self::ThisQuarter => quarter_range(quarter_start(today)),
            Self::LastQuarter => quarter_range(months_before(quarter_start(today), 3)),
            Self::ThisYear => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                DateRange::new(start, end, today.year().to_string())
            }
        }
    }
}

/// The range immediately before `start..=end`
///
/// A whole calendar month maps to the previous calendar month; any other
/// range maps to the same number of days ending the day before `start`.
pub fn previous_period(start: NaiveDate, end: NaiveDate) -> DateRange {
    let duration = (end - start).num_days();

    if start.day() == 1 && (27..=31).contains(&duration) {
        let prev_start = months_before(start, 1);
        return DateRange::new(prev_start, last_of_month(prev_start), month_label(prev_start));
    }

    let prev_end = start - Duration::days(1);
    let prev_start = prev_end - Duration::days(duration);
    DateRange::new(
        prev_start,
        prev_end,
        format!("{} - {}", prev_start, prev_end),
    )
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Same day `n` calendar months earlier, clamped to the month's end
pub fn months_before(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(n)).unwrap_or(date)
}

/// `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `YYYY-QN`
pub fn quarter_key(date: NaiveDate) -> String {
    format!("{}-Q{}", date.year(), quarter_of(date))
}

/// `January 2026`
fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = (quarter_of(date) - 1) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

fn quarter_range(start: NaiveDate) -> DateRange {
    let end = last_of_month(start.checked_add_months(Months::new(2)).unwrap_or(start));
    DateRange::new(
        start,
        end,
        format!("Q{} {}", quarter_of(start), start.year()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::date;

    #[test]
    fn test_this_month() {
        let range = NamedPeriod::ThisMonth.resolve(date("2026-02-14"));
        assert_eq!(range.start, date("2026-02-01"));
        assert_eq!(range.end, date("2026-02-28"));
        assert_eq!(range.label, "February 2026");

        let december = NamedPeriod::ThisMonth.resolve(date("2026-12-05"));
        assert_eq!(december.end, date("2026-12-31"));
    }

    #[test]
    fn test_last_month_across_year() {
        let range = NamedPeriod::LastMonth.resolve(date("2026-01-15"));
        assert_eq!(range.start, date("2025-12-01"));
        assert_eq!(range.end, date("2025-12-31"));
        assert_eq!(range.label, "December 2025");
    }

    #[test]
    fn test_this_quarter() {
        let range = NamedPeriod::ThisQuarter.resolve(date("2026-05-20"));
        assert_eq!(range.start, date("2026-04-01"));
        assert_eq!(range.end, date("2026-06-30"));
        assert_eq!(range.label, "Q2 2026");

        let q4 = NamedPeriod::ThisQuarter.resolve(date("2026-11-02"));
        assert_eq!(q4.end, date("2026-12-31"));
    }

    #[test]
    fn test_last_quarter() {
        let range = NamedPeriod::LastQuarter.resolve(date("2026-08-10"));
        assert_eq!(range.start, date("2026-04-01"));
        assert_eq!(range.end, date("2026-06-30"));
        assert_eq!(range.label, "Q2 2026");

        let january = NamedPeriod::LastQuarter.resolve(date("2026-01-03"));
        assert_eq!(january.start, date("2025-10-01"));
        assert_eq!(january.end, date("2025-12-31"));
        assert_eq!(january.label, "Q4 2025");
    }

    #[test]
    fn test_this_year() {
        let range = NamedPeriod::ThisYear.resolve(date("2026-07-01"));
        assert_eq!(range.start, date("2026-01-01"));
        assert_eq!(range.end, date("2026-12-31"));
        assert_eq!(range.label, "2026");
    }

    #[test]
    fn test_previous_period_of_month() {
        let prev = previous_period(date("2026-03-01"), date("2026-03-31"));
        assert_eq!(prev.start, date("2026-02-01"));
        assert_eq!(prev.end, date("2026-02-28"));
        assert_eq!(prev.label, "February 2026");

        let prev = previous_period(date("2026-01-01"), date("2026-01-31"));
        assert_eq!(prev.start, date("2025-12-01"));
        assert_eq!(prev.end, date("2025-12-31"));
    }

    #[test]
    fn test_previous_period_of_custom_range() {
        let prev = previous_period(date("2026-03-10"), date("2026-03-19"));
        assert_eq!(prev.end, date("2026-03-09"));
        assert_eq!(prev.start, date("2026-02-28"));
        assert_eq!(prev.label, "2026-02-28 - 2026-03-09");
    }

    #[test]
    fn test_keys() {
        assert_eq!(month_key(date("2026-03-09")), "2026-03");
        assert_eq!(quarter_key(date("2026-03-09")), "2026-Q1");
        assert_eq!(quarter_key(date("2026-10-01")), "2026-Q4");
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(last_of_month(date("2028-02-10")), date("2028-02-29"));
        assert_eq!(months_before(date("2026-03-31"), 1), date("2026-02-28"));
        assert!(NamedPeriod::ThisMonth
            .resolve(date("2026-02-14"))
            .contains(date("2026-02-28")));
    }
}
