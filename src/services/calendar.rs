//! Calendar range computation and period navigation
//!
//! Pure date math on `NaiveDate`, so there is no time-of-day or timezone
//! component to drift when ranges are later formatted as ISO date strings.

use crate::types::{DateRange, Direction, Period};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Canonical inclusive date range for the period containing `anchor`.
///
/// Weeks run Sunday through Saturday; months and years cover the full
/// calendar month/year of the anchor.
pub fn range_for(period: Period, anchor: NaiveDate) -> DateRange {
    match period {
        Period::Week => {
            let start = anchor - Duration::days(anchor.weekday().num_days_from_sunday() as i64);
            DateRange::new(start, start + Duration::days(6))
        }
        Period::Month => {
            let start = anchor.with_day(1).unwrap();
            let end = start.checked_add_months(Months::new(1)).unwrap() - Duration::days(1);
            DateRange::new(start, end)
        }
        Period::Year => DateRange::new(
            NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap(),
        ),
    }
}

/// Anchor date for the period adjacent to the one starting at `range_start`.
///
/// Month and year steps pin to day 1 / Jan 1, so stepping from a 31-day
/// month can never overflow into the month after next.
pub fn step(period: Period, range_start: NaiveDate, direction: Direction) -> NaiveDate {
    match period {
        Period::Week => match direction {
            Direction::Prev => range_start - Duration::days(7),
            Direction::Next => range_start + Duration::days(7),
        },
        Period::Month => {
            let first = range_start.with_day(1).unwrap();
            match direction {
                Direction::Prev => first.checked_sub_months(Months::new(1)).unwrap(),
                Direction::Next => first.checked_add_months(Months::new(1)).unwrap(),
            }
        }
        Period::Year => {
            let offset = match direction {
                Direction::Prev => -1,
                Direction::Next => 1,
            };
            NaiveDate::from_ymd_opt(range_start.year() + offset, 1, 1).unwrap()
        }
    }
}
