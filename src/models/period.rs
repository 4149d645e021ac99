//! Reporting period and holiday calendar models.
//!
//! This module contains the [`Period`] and [`Holiday`] types that define
//! the date range and holiday context for a reconciliation run.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A company-wide holiday, possibly spanning several consecutive days.
///
/// A single-day holiday has `start_date == end_date`. Holidays apply to
/// every employee; they are not tied to individual schedules.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     start_date: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
///     alias: "Christmas".to_string(),
/// };
///
/// assert!(holiday.covers(NaiveDate::from_ymd_opt(2025, 12, 26).unwrap()));
/// assert!(!holiday.covers(NaiveDate::from_ymd_opt(2025, 12, 27).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// First day of the holiday (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the holiday (inclusive).
    pub end_date: NaiveDate,
    /// The label recorded on covered days (e.g. "Independence Day").
    pub alias: String,
}

impl Holiday {
    /// Returns true when the holiday covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Which half of a month a half-month period covers.
///
/// Attendance cards are laid out as a half-month grid, so the engine can
/// build periods for either half directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthHalf {
    /// Days 1 through 15.
    First,
    /// Day 16 through the end of the month.
    Second,
}

/// An inclusive date range for a reconciliation run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let march = Period::month(2025, 3).unwrap();
/// assert_eq!(march.start_date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// assert_eq!(march.end_date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
/// assert!(march.contains(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Builds the period covering a whole calendar month.
    ///
    /// Returns `None` when `year`/`month` do not name a valid month.
    pub fn month(year: i32, month: u32) -> Option<Period> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end_date = start_date.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Period {
            start_date,
            end_date,
        })
    }

    /// Builds the period covering one half of a calendar month.
    ///
    /// The first half is days 1-15; the second half runs from day 16 to
    /// the last day of the month.
    pub fn half_month(year: i32, month: u32, half: MonthHalf) -> Option<Period> {
        let full = Period::month(year, month)?;
        match half {
            MonthHalf::First => Some(Period {
                start_date: full.start_date,
                end_date: NaiveDate::from_ymd_opt(year, month, 15)?,
            }),
            MonthHalf::Second => Some(Period {
                start_date: NaiveDate::from_ymd_opt(year, month, 16)?,
                end_date: full.end_date,
            }),
        }
    }

    /// Builds the period covering a whole calendar year.
    pub fn year(year: i32) -> Option<Period> {
        Some(Period {
            start_date: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end_date: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// Checks if a given date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every date in the period in ascending order.
    ///
    /// An inverted period yields nothing.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |date| *date <= end)
    }
}
