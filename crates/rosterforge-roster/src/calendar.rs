//! Calendar bucketing for contract maxima.
//!
//! Every bucket is computed from the local date of a shift's start, in the
//! shift's own UTC offset.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};

/// Local calendar date of an instant.
#[inline]
pub fn local_date(instant: &DateTime<FixedOffset>) -> NaiveDate {
    instant.date_naive()
}

/// Most recent `week_start_day` on or before `date`.
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use rosterforge_roster::calendar::week_start;
///
/// // 2024-03-07 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// assert_eq!(week_start(thursday, Weekday::Mon), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// assert_eq!(week_start(thursday, Weekday::Thu), thursday);
/// assert_eq!(week_start(thursday, Weekday::Fri), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// ```
pub fn week_start(date: NaiveDate, week_start_day: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() + 7
        - week_start_day.num_days_from_monday())
        % 7;
    date - Duration::days(i64::from(back))
}

/// Local `(year, month)` of a date.
#[inline]
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Converts summed seconds to whole minutes, truncating.
#[inline]
pub fn whole_minutes(seconds: i64) -> i64 {
    seconds / 60
}
