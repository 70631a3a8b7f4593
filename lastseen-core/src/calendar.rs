//! Civil calendar fields and date/time primitives
//!
//! Timestamps are converted to calendar fields with a [`Calendar`]. Both sides
//! of a comparison must go through the same calendar so that day-of-year and
//! year differences are computed in one timezone.
//!
//! Field conventions follow `struct tm`: years count from 1900, months and
//! days of year are 0-based, and day of week 0 is Sunday.

use crate::strings::{keys, Strings};
use crate::types::{DateFormat, DateTimeFormat, TimeFormat, Timestamp};
use chrono::{DateTime, Datelike, FixedOffset, Local, Offset, TimeZone, Timelike, Utc};

// ============================================
// Calendar Fields
// ============================================

/// Local calendar representation of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// Years since 1900
    pub year: i32,
    /// 0-based month
    pub month: u32,
    /// 1-based day of month
    pub day_of_month: u32,
    /// 0-based day of year
    pub day_of_year: u32,
    /// 0 = Sunday
    pub day_of_week: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CalendarFields {
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self {
            year: datetime.year() - 1900,
            month: datetime.month0(),
            day_of_month: datetime.day(),
            day_of_year: datetime.ordinal0(),
            day_of_week: datetime.weekday().num_days_from_sunday(),
            hour: datetime.hour(),
            minute: datetime.minute(),
        }
    }

    /// Four-digit year.
    pub fn full_year(&self) -> i32 {
        self.year + 1900
    }
}

/// Converts epoch seconds into calendar fields.
pub trait Calendar: Send + Sync {
    fn fields(&self, timestamp: Timestamp) -> CalendarFields;
}

/// Out-of-range timestamps resolve to the epoch.
fn utc_datetime(timestamp: Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

/// The process's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn fields(&self, timestamp: Timestamp) -> CalendarFields {
        CalendarFields::from_datetime(&utc_datetime(timestamp).with_timezone(&Local))
    }
}

/// A fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetCalendar {
    offset: FixedOffset,
}

impl FixedOffsetCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Offset east of UTC in seconds; `None` if out of range.
    pub fn east(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Self::new)
    }
}

impl Default for FixedOffsetCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar for FixedOffsetCalendar {
    fn fields(&self, timestamp: Timestamp) -> CalendarFields {
        CalendarFields::from_datetime(&utc_datetime(timestamp).with_timezone(&self.offset))
    }
}

// ============================================
// Date Buckets
// ============================================

/// Rendering strategy chosen by comparing a timestamp with "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateBucket {
    Today,
    Yesterday,
    /// Two to six days back
    ThisWeek,
    SameYearOtherDate,
    OtherYear,
}

/// Day-of-year of `fields` minus day-of-year of `now`.
///
/// Only meaningful when both fall in the same year.
pub fn day_difference(fields: &CalendarFields, now: &CalendarFields) -> i64 {
    i64::from(fields.day_of_year) - i64::from(now.day_of_year)
}

pub fn date_bucket(fields: &CalendarFields, now: &CalendarFields) -> DateBucket {
    if fields.year != now.year {
        return DateBucket::OtherYear;
    }

    match day_difference(fields, now) {
        0 => DateBucket::Today,
        -1 => DateBucket::Yesterday,
        -6..=-2 => DateBucket::ThisWeek,
        _ => DateBucket::SameYearOtherDate,
    }
}

// ============================================
// Date/Time Strings
// ============================================

/// Numeric date with a two-digit year.
///
/// `month` is 1-based; `year` counts from 1900 and is shown as `year - 100`.
/// Month-first leaves day and month unpadded, day-first pads the month.
pub fn string_for_timestamp_with_year(
    day: u32,
    month: u32,
    year: i32,
    format: &DateTimeFormat,
) -> String {
    let separator = &format.date_separator;
    match format.date_format {
        DateFormat::MonthFirst => {
            format!("{}{}{}{}{:02}", month, separator, day, separator, year - 100)
        }
        DateFormat::DayFirst => {
            format!("{}{}{:02}{}{:02}", day, separator, month, separator, year - 100)
        }
    }
}

/// Numeric date without a year. `month` is 1-based.
pub fn string_for_timestamp(day: u32, month: u32, format: &DateTimeFormat) -> String {
    let separator = &format.date_separator;
    match format.date_format {
        DateFormat::MonthFirst => format!("{}{}{}", month, separator, day),
        DateFormat::DayFirst => format!("{}{}{:02}", day, separator, month),
    }
}

/// Clock time in the format's convention, e.g. `14:05` or `2:05 PM`.
pub fn string_for_short_timestamp(hours: u32, minutes: u32, format: &DateTimeFormat) -> String {
    match format.time_format {
        TimeFormat::Military => format!("{:02}:{:02}", hours, minutes),
        TimeFormat::Regular => {
            let hour = match hours {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            let period = if hours >= 12 { "PM" } else { "AM" };
            format!("{}:{:02} {}", hour, minutes, period)
        }
    }
}

/// Short weekday name; `""` outside 0..=6.
pub fn short_string_for_day_of_week(strings: &Strings, day: u32) -> String {
    keys::WEEKDAY_SHORT
        .get(day as usize)
        .map(|key| strings.get(key))
        .unwrap_or_default()
}

/// Genitive month name for a 0-based month; `""` outside 0..=11.
pub fn string_for_month(strings: &Strings, month: u32) -> String {
    keys::MONTH_GEN
        .get(month as usize)
        .map(|key| strings.get(key))
        .unwrap_or_default()
}

/// Month name followed by the four-digit year (`year` counts from 1900).
pub fn string_for_month_of_year(strings: &Strings, month: u32, year: i32) -> String {
    format!("{} {}", string_for_month(strings, month), 1900 + year)
}

/// Full localized date with time, e.g. `March 14, 2024 at 2:30 PM`.
pub fn string_for_full_date(
    strings: &Strings,
    fields: &CalendarFields,
    format: &DateTimeFormat,
) -> String {
    let month = string_for_month(strings, fields.month);
    let day = fields.day_of_month.to_string();
    let year = fields.full_year().to_string();
    let time = string_for_short_timestamp(fields.hour, fields.minute, format);
    strings.format(keys::TIME_FULL_DATE, &[&month, &day, &year, &time])
}
