//! # lastseen-core
//!
//! Core library for lastseen - localized presence and relative-time strings
//! for a messaging client.
//!
//! This library provides:
//! - Presence classification ("online", "last seen ...", "recently")
//! - Refresh timeouts telling callers when a rendered string goes stale
//! - Calendar-aware timestamp strings ("today at 14:30", "Tue", "3/15/24")
//! - Mute-interval strings
//! - Localized string tables, configuration and logging
//!
//! ## Example
//!
//! ```rust
//! use lastseen_core::calendar::FixedOffsetCalendar;
//! use lastseen_core::{DateTimeFormat, PresenceFormatter, PresenceStatus, Strings, UserPresence};
//!
//! let formatter = PresenceFormatter::with_calendar(
//!     Strings::english(),
//!     DateTimeFormat::default(),
//!     FixedOffsetCalendar::utc(),
//! );
//!
//! let now = 1_710_504_000;
//! let presence = UserPresence::with_status(PresenceStatus::Present(now - 125));
//! let (text, online) = formatter.string_and_activity_for_user_presence(&presence, now);
//!
//! assert_eq!(text, "last seen 2 minutes ago");
//! assert!(!online);
//! ```

// Re-export commonly used items at the crate root
pub use calendar::{Calendar, CalendarFields, DateBucket, FixedOffsetCalendar, LocalCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use presence::{
    refresh_interval, relative_user_presence_last_seen, relative_user_presence_status,
    user_presence_string_refresh_timeout,
};
pub use render::PresenceFormatter;
pub use strings::Strings;
pub use types::*;

// Public modules
pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod presence;
pub mod render;
pub mod strings;
pub mod types;
