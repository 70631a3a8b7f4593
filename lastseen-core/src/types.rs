//! Core domain types for lastseen
//!
//! These types describe a user's presence as reported by the messaging backend
//! and the display categories derived from it.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Presence** | The raw status the backend reports for a user |
//! | **Reference timestamp** | The "now" a presence is classified against |
//! | **Last activity** | When a `recently` user was last known to be active |
//! | **Relative status** | Online/offline/last-seen category derived from a presence |
//!
//! All timestamps are POSIX epoch seconds.

use serde::{Deserialize, Serialize};

/// Epoch seconds.
///
/// The backend ships these as 32-bit values. Arithmetic on them saturates,
/// so every `i64` is a valid input.
pub type Timestamp = i64;

// ============================================
// Presence
// ============================================

/// Raw presence status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "at", rename_all = "snake_case")]
pub enum PresenceStatus {
    /// Hidden or never seen
    #[default]
    None,
    /// Online until, or last seen at, the given timestamp
    Present(Timestamp),
    /// Seen within the last few days
    Recently,
    /// Seen within the last week
    LastWeek,
    /// Seen within the last month
    LastMonth,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::None => "none",
            PresenceStatus::Present(_) => "present",
            PresenceStatus::Recently => "recently",
            PresenceStatus::LastWeek => "last_week",
            PresenceStatus::LastMonth => "last_month",
        }
    }
}

/// A user's presence together with their last known activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPresence {
    pub status: PresenceStatus,
    /// Only consulted for [`PresenceStatus::Recently`]
    #[serde(default)]
    pub last_activity: Timestamp,
}

impl UserPresence {
    pub fn new(status: PresenceStatus, last_activity: Timestamp) -> Self {
        Self {
            status,
            last_activity,
        }
    }

    /// Presence with no last-activity information.
    pub fn with_status(status: PresenceStatus) -> Self {
        Self::new(status, 0)
    }
}

// ============================================
// Derived Status
// ============================================

/// Coarse presence category relative to a reference timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "at", rename_all = "snake_case")]
pub enum RelativeUserPresenceStatus {
    Offline,
    Online(Timestamp),
    LastSeen(Timestamp),
    Recently,
    LastWeek,
    LastMonth,
}

impl RelativeUserPresenceStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, RelativeUserPresenceStatus::Online(_))
    }
}

/// Fine-grained "last seen" display state.
///
/// Months are 0-based and years count from 1900, matching [`crate::calendar::CalendarFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeUserPresenceLastSeen {
    JustNow,
    MinutesAgo(i64),
    HoursAgo(i64),
    TodayAt { hours: u32, minutes: u32 },
    YesterdayAt { hours: u32, minutes: u32 },
    ThisYear { month: u32, day: u32 },
    AtDate { year: i32, month: u32 },
}

/// Which relative day a "today at"/"yesterday at" string names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeTimestampFormatDay {
    Today,
    Yesterday,
}

// ============================================
// Date/Time Format
// ============================================

/// Order of day and month in numeric dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    #[default]
    MonthFirst,
    DayFirst,
}

impl std::str::FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month_first" | "month-first" => Ok(DateFormat::MonthFirst),
            "day_first" | "day-first" => Ok(DateFormat::DayFirst),
            _ => Err(format!("unknown date format: {}", s)),
        }
    }
}

/// Clock convention for short times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 12-hour clock with AM/PM
    #[default]
    Regular,
    /// Zero-padded 24-hour clock
    Military,
}

impl std::str::FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" | "12h" => Ok(TimeFormat::Regular),
            "military" | "24h" => Ok(TimeFormat::Military),
            _ => Err(format!("unknown time format: {}", s)),
        }
    }
}

/// Regional date/time preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFormat {
    /// Placed between day, month and year
    #[serde(default = "default_date_separator")]
    pub date_separator: String,
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default)]
    pub time_format: TimeFormat,
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self {
            date_separator: default_date_separator(),
            date_format: DateFormat::default(),
            time_format: TimeFormat::default(),
        }
    }
}

fn default_date_separator() -> String {
    "/".to_string()
}

impl DateTimeFormat {
    pub fn new(
        date_separator: impl Into<String>,
        date_format: DateFormat,
        time_format: TimeFormat,
    ) -> Self {
        Self {
            date_separator: date_separator.into(),
            date_format,
            time_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_status_from_toml() {
        let presence: UserPresence = toml::from_str(
            r#"
[status]
type = "present"
at = 42
"#,
        )
        .unwrap();
        assert_eq!(presence.status, PresenceStatus::Present(42));
        assert_eq!(presence.last_activity, 0);
    }

    #[test]
    fn test_user_presence_from_toml() {
        let presence: UserPresence = toml::from_str(
            r#"
last_activity = 100
[status]
type = "recently"
"#,
        )
        .unwrap();
        assert_eq!(presence.status, PresenceStatus::Recently);
        assert_eq!(presence.last_activity, 100);
    }

    #[test]
    fn test_date_time_format_defaults() {
        let format: DateTimeFormat = toml::from_str("").unwrap();
        assert_eq!(format, DateTimeFormat::default());
        assert_eq!(format.date_separator, "/");
        assert_eq!(format.date_format, DateFormat::MonthFirst);
        assert_eq!(format.time_format, TimeFormat::Regular);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("day_first".parse::<DateFormat>(), Ok(DateFormat::DayFirst));
        assert_eq!("month-first".parse::<DateFormat>(), Ok(DateFormat::MonthFirst));
        assert!("sideways".parse::<DateFormat>().is_err());
        assert_eq!("24h".parse::<TimeFormat>(), Ok(TimeFormat::Military));
    }

    #[test]
    fn test_is_online() {
        assert!(RelativeUserPresenceStatus::Online(5).is_online());
        assert!(!RelativeUserPresenceStatus::LastSeen(5).is_online());
    }
}
