//! ISO-8601 week arithmetic
//!
//! Week 1 is the week holding the year's first Thursday; weeks run Monday
//! to Sunday. A date's ISO year can differ from its calendar year in the
//! first and last days of January/December, so the week number is always
//! carried together with its ISO year.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};

/// An ISO week: (ISO year, week number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

/// Monday–Sunday span of an ISO week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The seven dates of the week, Monday first
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(7)
    }
}

/// ISO week of `date`
pub fn week_number_of(date: NaiveDate) -> IsoWeek {
    let iso = date.iso_week();
    IsoWeek {
        year: iso.year(),
        week: iso.week(),
    }
}

/// Number of ISO weeks in `year` (52 or 53)
///
/// 28 December always falls in the last ISO week of its year, unlike
/// 31 December which can already belong to week 1 of the next one.
pub fn weeks_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

/// Monday and Sunday of ISO week `week` of `year`
pub fn week_date_range(year: i32, week: u32) -> AppResult<WeekRange> {
    let max = weeks_in_year(year);
    if week == 0 || week > max {
        return Err(AppError::with_message(
            ErrorCode::InvalidWeek,
            format!("Week must be between 1 and {} for {}", max, year),
        )
        .with_detail("year", year)
        .with_detail("week", week));
    }

    let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon);
    let end = NaiveDate::from_isoywd_opt(year, week, Weekday::Sun);
    match (start, end) {
        (Some(start), Some(end)) => Ok(WeekRange { start, end }),
        _ => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Year {} is outside the supported calendar", year),
        )),
    }
}

/// ISO week containing today's local date
pub fn current_week() -> IsoWeek {
    week_number_of(Local::now().date_naive())
}

impl IsoWeek {
    pub fn new(year: i32, week: u32) -> AppResult<Self> {
        week_date_range(year, week)?;
        Ok(Self { year, week })
    }

    pub fn range(&self) -> AppResult<WeekRange> {
        week_date_range(self.year, self.week)
    }

    /// The week before, wrapping into the last week of the previous year
    pub fn previous(&self) -> IsoWeek {
        if self.week <= 1 {
            let year = self.year - 1;
            IsoWeek {
                year,
                week: weeks_in_year(year),
            }
        } else {
            IsoWeek {
                year: self.year,
                week: self.week - 1,
            }
        }
    }

    /// The week after, wrapping into week 1 of the next year
    pub fn next(&self) -> IsoWeek {
        if self.week >= weeks_in_year(self.year) {
            IsoWeek {
                year: self.year + 1,
                week: 1,
            }
        } else {
            IsoWeek {
                year: self.year,
                week: self.week + 1,
            }
        }
    }
}
