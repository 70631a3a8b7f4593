//! Display strings for presence, timestamps and mute intervals
//!
//! [`PresenceFormatter`] combines a localized [`Strings`] table, the regional
//! [`DateTimeFormat`] and a [`Calendar`]. Every method is total: it always
//! produces a string.

use crate::calendar::{
    date_bucket, day_difference, short_string_for_day_of_week, string_for_full_date,
    string_for_short_timestamp, string_for_timestamp, string_for_timestamp_with_year, Calendar,
    CalendarFields, DateBucket, LocalCalendar,
};
use crate::clock::Clock;
use crate::presence::RECENT_ACTIVITY_WINDOW;
use crate::strings::{keys, Strings};
use crate::types::{
    DateTimeFormat, PresenceStatus, RelativeTimestampFormatDay, Timestamp, UserPresence,
};

const MINUTE: Timestamp = 60;
const HOUR: Timestamp = 60 * 60;
const DAY: Timestamp = 24 * 60 * 60;

/// Renders presence and time strings for one locale.
#[derive(Debug, Clone)]
pub struct PresenceFormatter<C: Calendar = LocalCalendar> {
    strings: Strings,
    date_time_format: DateTimeFormat,
    calendar: C,
}

impl PresenceFormatter<LocalCalendar> {
    /// Formatter using the process's local timezone.
    pub fn new(strings: Strings, date_time_format: DateTimeFormat) -> Self {
        Self::with_calendar(strings, date_time_format, LocalCalendar)
    }
}

impl<C: Calendar> PresenceFormatter<C> {
    pub fn with_calendar(strings: Strings, date_time_format: DateTimeFormat, calendar: C) -> Self {
        Self {
            strings,
            date_time_format,
            calendar,
        }
    }

    pub fn strings(&self) -> &Strings {
        &self.strings
    }

    pub fn date_time_format(&self) -> &DateTimeFormat {
        &self.date_time_format
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    fn fields_pair(
        &self,
        timestamp: Timestamp,
        relative_to: Timestamp,
    ) -> (CalendarFields, CalendarFields) {
        (self.calendar.fields(timestamp), self.calendar.fields(relative_to))
    }

    fn short_time(&self, fields: &CalendarFields) -> String {
        string_for_short_timestamp(fields.hour, fields.minute, &self.date_time_format)
    }

    fn date_with_year(&self, fields: &CalendarFields) -> String {
        string_for_timestamp_with_year(
            fields.day_of_month,
            fields.month + 1,
            fields.year,
            &self.date_time_format,
        )
    }

    fn date_without_year(&self, fields: &CalendarFields) -> String {
        string_for_timestamp(fields.day_of_month, fields.month + 1, &self.date_time_format)
    }

    // ============================================
    // Timestamps
    // ============================================

    /// "today at 14:30", "yesterday at 09:15", or a numeric date.
    ///
    /// Other days of the current year render without the year; the week
    /// bucket gets no weekday name here.
    pub fn human_readable_string_for_timestamp(
        &self,
        timestamp: Timestamp,
        clock: &dyn Clock,
    ) -> String {
        let (fields, now) = self.fields_pair(timestamp, clock.now());
        let bucket = date_bucket(&fields, &now);
        tracing::trace!(timestamp, ?bucket, "human readable timestamp");

        match bucket {
            DateBucket::OtherYear => self.date_with_year(&fields),
            DateBucket::Today => {
                self.human_readable_day(RelativeTimestampFormatDay::Today, &fields)
            }
            DateBucket::Yesterday => {
                self.human_readable_day(RelativeTimestampFormatDay::Yesterday, &fields)
            }
            DateBucket::ThisWeek | DateBucket::SameYearOtherDate => {
                self.date_without_year(&fields)
            }
        }
    }

    fn human_readable_day(
        &self,
        day: RelativeTimestampFormatDay,
        fields: &CalendarFields,
    ) -> String {
        let time = self.short_time(fields);
        let key = match day {
            RelativeTimestampFormatDay::Today => keys::TIME_TODAY_AT,
            RelativeTimestampFormatDay::Yesterday => keys::TIME_YESTERDAY_AT,
        };
        self.strings.format(key, &[&time])
    }

    /// Chat-list style timestamp: time today, weekday within the week, date otherwise.
    pub fn string_for_relative_timestamp(
        &self,
        relative_timestamp: Timestamp,
        relative_to: Timestamp,
    ) -> String {
        self.compact_relative_string(relative_timestamp, relative_to)
    }

    /// Same rendering as [`Self::string_for_relative_timestamp`], for live location updates.
    pub fn string_for_relative_live_location_update_timestamp(
        &self,
        relative_timestamp: Timestamp,
        relative_to: Timestamp,
    ) -> String {
        self.compact_relative_string(relative_timestamp, relative_to)
    }

    fn compact_relative_string(
        &self,
        relative_timestamp: Timestamp,
        relative_to: Timestamp,
    ) -> String {
        let (fields, now) = self.fields_pair(relative_timestamp, relative_to);
        if fields.year != now.year {
            return self.date_with_year(&fields);
        }

        let day_difference = day_difference(&fields, &now);
        tracing::trace!(
            relative_timestamp,
            relative_to,
            day_difference,
            "compact relative timestamp"
        );

        if day_difference > -7 {
            if day_difference == 0 {
                self.short_time(&fields)
            } else {
                short_string_for_day_of_week(&self.strings, fields.day_of_week)
            }
        } else {
            self.date_without_year(&fields)
        }
    }

    /// "updated just now", "updated 5 minutes ago", "updated today at 14:30",
    /// or the full date.
    pub fn string_for_relative_live_location_timestamp(
        &self,
        relative_timestamp: Timestamp,
        relative_to: Timestamp,
    ) -> String {
        let difference = relative_to.saturating_sub(relative_timestamp);
        if difference < MINUTE {
            return self.strings.get(keys::LIVE_LOCATION_UPDATED_JUST_NOW);
        }
        if difference < HOUR {
            let minutes = difference / MINUTE;
            return self
                .strings
                .plural(keys::LIVE_LOCATION_UPDATED_MINUTES_AGO, minutes, &[]);
        }

        let (fields, now) = self.fields_pair(relative_timestamp, relative_to);
        match date_bucket(&fields, &now) {
            DateBucket::Today => {
                let time = self.short_time(&fields);
                self.strings
                    .format(keys::LIVE_LOCATION_UPDATED_TODAY_AT, &[&time])
            }
            _ => string_for_full_date(&self.strings, &fields, &self.date_time_format),
        }
    }

    // ============================================
    // Presence
    // ============================================

    /// "last seen today at ..." / "last seen yesterday at ...".
    pub fn string_for_user_presence_day(
        &self,
        day: RelativeTimestampFormatDay,
        hours: u32,
        minutes: u32,
    ) -> String {
        let time = string_for_short_timestamp(hours, minutes, &self.date_time_format);
        match day {
            RelativeTimestampFormatDay::Today => {
                let today = self.strings.format(keys::TIME_TODAY_AT, &[&time]);
                self.strings.format(keys::LAST_SEEN_AT_DATE, &[&today])
            }
            RelativeTimestampFormatDay::Yesterday => {
                self.strings.format(keys::LAST_SEEN_YESTERDAY_AT, &[&time])
            }
        }
    }

    /// Presence string and whether the user is currently online.
    pub fn string_and_activity_for_user_presence(
        &self,
        presence: &UserPresence,
        relative_to: Timestamp,
    ) -> (String, bool) {
        match presence.status {
            PresenceStatus::None => (self.strings.get(keys::LAST_SEEN_OFFLINE), false),
            PresenceStatus::Present(status_timestamp) => {
                if status_timestamp >= relative_to {
                    (self.strings.get(keys::PRESENCE_ONLINE), true)
                } else {
                    (self.last_seen_string(status_timestamp, relative_to), false)
                }
            }
            PresenceStatus::Recently => {
                let active_until = presence.last_activity.saturating_add(RECENT_ACTIVITY_WINDOW);
                if active_until >= relative_to {
                    (self.strings.get(keys::PRESENCE_ONLINE), true)
                } else {
                    (self.strings.get(keys::LAST_SEEN_LATELY), false)
                }
            }
            PresenceStatus::LastWeek => (self.strings.get(keys::LAST_SEEN_WITHIN_A_WEEK), false),
            PresenceStatus::LastMonth => {
                (self.strings.get(keys::LAST_SEEN_WITHIN_A_MONTH), false)
            }
        }
    }

    fn last_seen_string(&self, status_timestamp: Timestamp, relative_to: Timestamp) -> String {
        let difference = relative_to.saturating_sub(status_timestamp);
        if difference < MINUTE {
            return self.strings.get(keys::LAST_SEEN_JUST_NOW);
        }
        if difference < HOUR {
            let minutes = difference / MINUTE;
            return self.strings.plural(keys::LAST_SEEN_MINUTES_AGO, minutes, &[]);
        }

        let (fields, now) = self.fields_pair(status_timestamp, relative_to);
        let bucket = date_bucket(&fields, &now);
        tracing::trace!(status_timestamp, relative_to, ?bucket, "last seen");

        match bucket {
            DateBucket::Today => {
                let hours = difference / HOUR;
                self.strings.plural(keys::LAST_SEEN_HOURS_AGO, hours, &[])
            }
            DateBucket::Yesterday => self.string_for_user_presence_day(
                RelativeTimestampFormatDay::Yesterday,
                fields.hour,
                fields.minute,
            ),
            DateBucket::ThisWeek | DateBucket::SameYearOtherDate | DateBucket::OtherYear => {
                let date = self.date_with_year(&fields);
                self.strings.format(keys::LAST_SEEN_AT_DATE, &[&date])
            }
        }
    }

    // ============================================
    // Mute
    // ============================================

    /// "muted for N minutes/hours/days" until `mute_interval` (epoch seconds).
    ///
    /// Never reports less than one minute.
    pub fn string_for_remaining_mute_interval(
        &self,
        mute_interval: Timestamp,
        clock: &dyn Clock,
    ) -> String {
        let value = mute_interval.saturating_sub(clock.now()).max(MINUTE);
        if value <= HOUR {
            let minutes = (value as f32 / MINUTE as f32).round() as i64;
            self.strings.plural(keys::MUTE_EXPIRES_MINUTES, minutes, &[])
        } else if value <= DAY {
            let hours = (value as f32 / HOUR as f32).round() as i64;
            self.strings.plural(keys::MUTE_EXPIRES_HOURS, hours, &[])
        } else {
            let days = (value as f32 / DAY as f32).round() as i64;
            self.strings.plural(keys::MUTE_EXPIRES_DAYS, days, &[])
        }
    }
}
