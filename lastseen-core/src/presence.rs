//! Presence classification
//!
//! Turns a raw [`UserPresence`] into a relative category, and tells callers how
//! long a rendered presence string stays accurate.

use crate::calendar::{date_bucket, Calendar, DateBucket};
use crate::types::{
    PresenceStatus, RelativeUserPresenceLastSeen, RelativeUserPresenceStatus, Timestamp,
    UserPresence,
};
use std::time::Duration;

/// A `recently` user counts as online this long after their last activity.
pub const RECENT_ACTIVITY_WINDOW: Timestamp = 30;

const MINUTE: Timestamp = 60;
const HOUR: Timestamp = 60 * 60;

/// Classifies `presence` relative to `timestamp`.
pub fn relative_user_presence_status(
    presence: &UserPresence,
    timestamp: Timestamp,
) -> RelativeUserPresenceStatus {
    match presence.status {
        PresenceStatus::None => RelativeUserPresenceStatus::Offline,
        PresenceStatus::Present(status_timestamp) => {
            if status_timestamp >= timestamp {
                RelativeUserPresenceStatus::Online(status_timestamp)
            } else {
                RelativeUserPresenceStatus::LastSeen(status_timestamp)
            }
        }
        PresenceStatus::Recently => {
            let active_until = presence.last_activity.saturating_add(RECENT_ACTIVITY_WINDOW);
            if active_until >= timestamp {
                RelativeUserPresenceStatus::Online(active_until)
            } else {
                RelativeUserPresenceStatus::Recently
            }
        }
        PresenceStatus::LastWeek => RelativeUserPresenceStatus::LastWeek,
        PresenceStatus::LastMonth => RelativeUserPresenceStatus::LastMonth,
    }
}

/// Seconds until the presence string for `presence` goes stale.
///
/// Infinity means the string is date based and never needs a timer.
pub fn user_presence_string_refresh_timeout(presence: &UserPresence, timestamp: Timestamp) -> f64 {
    match presence.status {
        PresenceStatus::Present(status_timestamp) => {
            if status_timestamp >= timestamp {
                status_timestamp.saturating_sub(timestamp) as f64
            } else {
                let difference = timestamp.saturating_sub(status_timestamp);
                if difference < 30 {
                    ((30 - difference) + 1) as f64
                } else if difference < HOUR {
                    ((difference % MINUTE) + 1) as f64
                } else {
                    f64::INFINITY
                }
            }
        }
        PresenceStatus::Recently => {
            let active_until = presence.last_activity.saturating_add(RECENT_ACTIVITY_WINDOW);
            if active_until >= timestamp {
                active_until.saturating_sub(timestamp).saturating_add(1) as f64
            } else {
                f64::INFINITY
            }
        }
        PresenceStatus::None | PresenceStatus::LastWeek | PresenceStatus::LastMonth => {
            f64::INFINITY
        }
    }
}

/// [`user_presence_string_refresh_timeout`] as a timer interval.
///
/// Returns `None` when no refresh is needed.
pub fn refresh_interval(presence: &UserPresence, timestamp: Timestamp) -> Option<Duration> {
    let timeout = user_presence_string_refresh_timeout(presence, timestamp);
    if timeout.is_finite() {
        Some(Duration::from_secs(timeout as u64))
    } else {
        None
    }
}

/// Fine-grained "last seen" state for a timestamp in the past.
///
/// Never yields `TodayAt`: same-day timestamps older than an hour are reported
/// as `HoursAgo`.
pub fn relative_user_presence_last_seen<C: Calendar + ?Sized>(
    at: Timestamp,
    timestamp: Timestamp,
    calendar: &C,
) -> RelativeUserPresenceLastSeen {
    let difference = timestamp.saturating_sub(at);
    if difference < MINUTE {
        return RelativeUserPresenceLastSeen::JustNow;
    }
    if difference < HOUR {
        return RelativeUserPresenceLastSeen::MinutesAgo(difference / MINUTE);
    }

    let fields = calendar.fields(at);
    let now = calendar.fields(timestamp);
    match date_bucket(&fields, &now) {
        DateBucket::Today => RelativeUserPresenceLastSeen::HoursAgo(difference / HOUR),
        DateBucket::Yesterday => RelativeUserPresenceLastSeen::YesterdayAt {
            hours: fields.hour,
            minutes: fields.minute,
        },
        DateBucket::ThisWeek | DateBucket::SameYearOtherDate => {
            RelativeUserPresenceLastSeen::ThisYear {
                month: fields.month,
                day: fields.day_of_month,
            }
        }
        DateBucket::OtherYear => RelativeUserPresenceLastSeen::AtDate {
            year: fields.year,
            month: fields.month,
        },
    }
}
