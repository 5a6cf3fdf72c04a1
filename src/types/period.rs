//! Calendar period selection and date-range types

use chrono::{Datelike, Months, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Reporting period selectable in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(s)
    }
}

/// Periods the per-device stats card supports.
///
/// The backend only stores exact `month#` and `year#` rollups, so week is
/// unrepresentable here by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsPeriod {
    Month,
    Year,
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatsPeriod::Month => "month",
            StatsPeriod::Year => "year",
        };
        f.write_str(s)
    }
}

/// Navigation direction for period stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Inclusive calendar date range (whole days, no time component)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day in the range as `YYYY-MM-DD` keys, chronological.
    pub fn day_keys(&self) -> Vec<String> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Every month touched by the range as `YYYY-MM` keys, chronological.
    pub fn month_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let mut cursor = self.start.with_day(1).unwrap();
        let last = self.end.with_day(1).unwrap();
        while cursor <= last {
            keys.push(cursor.format("%Y-%m").to_string());
            cursor = cursor.checked_add_months(Months::new(1)).unwrap();
        }
        keys
    }

    /// Some((year, month)) when the range stays within one calendar month.
    pub fn single_month(&self) -> Option<(i32, u32)> {
        if self.start.year() == self.end.year() && self.start.month() == self.end.month() {
            Some((self.start.year(), self.start.month()))
        } else {
            None
        }
    }

    /// Some(year) when the range stays within one calendar year.
    pub fn single_year(&self) -> Option<i32> {
        if self.start.year() == self.end.year() {
            Some(self.start.year())
        } else {
            None
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
