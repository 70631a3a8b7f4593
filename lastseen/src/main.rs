//! lastseen - render presence and relative-time strings
//!
//! Prints the same strings a chat client shows for a user's presence,
//! message timestamps, live locations and muted chats.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lastseen_core::{
    relative_user_presence_status, user_presence_string_refresh_timeout, Calendar, Clock, Config,
    FixedClock, FixedOffsetCalendar, LocalCalendar, PresenceFormatter, PresenceStatus,
    RelativeUserPresenceStatus, SystemClock, Timestamp, UserPresence,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lastseen")]
#[command(about = "Render presence, last-seen and mute strings")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/lastseen/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use UTC instead of the local timezone
    #[arg(long, global = true)]
    utc: bool,

    /// Reference time in epoch seconds (default: current time)
    #[arg(long, global = true, allow_hyphen_values = true)]
    now: Option<Timestamp>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Presence string for a user
    Presence {
        /// Raw presence status
        #[arg(value_enum)]
        status: StatusArg,

        /// Online-until / last-seen timestamp (required for `present`)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Timestamp>,

        /// Last activity timestamp (used with `recently`)
        #[arg(long, allow_hyphen_values = true)]
        last_activity: Option<Timestamp>,

        /// Print JSON with classification and refresh timeout
        #[arg(long)]
        json: bool,
    },

    /// Timestamp string
    Timestamp {
        /// Epoch seconds to render
        timestamp: Timestamp,

        /// Rendering style
        #[arg(long, value_enum, default_value_t = Style::Human)]
        style: Style,
    },

    /// Remaining mute interval
    Mute {
        /// Epoch seconds the mute expires at
        until: Timestamp,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    None,
    Present,
    Recently,
    LastWeek,
    LastMonth,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Style {
    Human,
    Relative,
    LiveLocation,
    LiveLocationUpdate,
}

#[derive(Serialize)]
struct PresenceReport {
    text: String,
    online: bool,
    status: RelativeUserPresenceStatus,
    /// `None` when the string never needs refreshing
    refresh_timeout: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    let _log_guard = lastseen_core::logging::init(&config.logging).ok();

    let strings = config.strings().context("failed to load string table")?;
    let date_time_format = config.format.clone();

    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    if args.utc {
        let formatter =
            PresenceFormatter::with_calendar(strings, date_time_format, FixedOffsetCalendar::utc());
        run(&args.command, &formatter, clock.as_ref())
    } else {
        let formatter = PresenceFormatter::with_calendar(strings, date_time_format, LocalCalendar);
        run(&args.command, &formatter, clock.as_ref())
    }
}

fn run<C: Calendar>(
    command: &Command,
    formatter: &PresenceFormatter<C>,
    clock: &dyn Clock,
) -> Result<()> {
    let now = clock.now();
    tracing::debug!(?command, now, "Rendering");

    match command {
        Command::Presence {
            status,
            at,
            last_activity,
            json,
        } => {
            let presence = build_presence(*status, *at, *last_activity)?;
            let (text, online) = formatter.string_and_activity_for_user_presence(&presence, now);

            if *json {
                let timeout = user_presence_string_refresh_timeout(&presence, now);
                let report = PresenceReport {
                    text,
                    online,
                    status: relative_user_presence_status(&presence, now),
                    refresh_timeout: timeout.is_finite().then_some(timeout),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", text);
            }
        }
        Command::Timestamp { timestamp, style } => {
            let text = match style {
                Style::Human => formatter.human_readable_string_for_timestamp(*timestamp, clock),
                Style::Relative => formatter.string_for_relative_timestamp(*timestamp, now),
                Style::LiveLocation => {
                    formatter.string_for_relative_live_location_timestamp(*timestamp, now)
                }
                Style::LiveLocationUpdate => {
                    formatter.string_for_relative_live_location_update_timestamp(*timestamp, now)
                }
            };
            println!("{}", text);
        }
        Command::Mute { until } => {
            println!("{}", formatter.string_for_remaining_mute_interval(*until, clock));
        }
    }

    Ok(())
}

fn build_presence(
    status: StatusArg,
    at: Option<Timestamp>,
    last_activity: Option<Timestamp>,
) -> Result<UserPresence> {
    let status = match status {
        StatusArg::None => PresenceStatus::None,
        StatusArg::Present => {
            let at = at.context("`present` requires --at <timestamp>")?;
            PresenceStatus::Present(at)
        }
        StatusArg::Recently => PresenceStatus::Recently,
        StatusArg::LastWeek => PresenceStatus::LastWeek,
        StatusArg::LastMonth => PresenceStatus::LastMonth,
    };

    Ok(UserPresence::new(status, last_activity.unwrap_or_default()))
}
