//! Integration tests for lastseen-core
//!
//! These tests load string tables from `tests/fixtures/strings/` and config
//! files from temp directories, then drive the formatter end to end.

use lastseen_core::calendar::FixedOffsetCalendar;
use lastseen_core::clock::FixedClock;
use lastseen_core::config::Config;
use lastseen_core::types::{
    DateFormat, DateTimeFormat, PresenceStatus, RelativeUserPresenceStatus, TimeFormat,
    UserPresence,
};
use lastseen_core::{
    relative_user_presence_status, user_presence_string_refresh_timeout, Error,
    PresenceFormatter, Strings,
};
use std::path::PathBuf;
use tempfile::TempDir;

// 2024-03-15 12:00:00 UTC, a Friday
const NOW: i64 = 1_710_504_000;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/strings")
        .join(name)
}

fn russian_formatter() -> PresenceFormatter<FixedOffsetCalendar> {
    lastseen_core::logging::init_test();
    let strings = Strings::load_from(&fixture_path("ru.toml")).expect("fixture should load");
    PresenceFormatter::with_calendar(
        strings,
        DateTimeFormat::new(".", DateFormat::DayFirst, TimeFormat::Military),
        FixedOffsetCalendar::utc(),
    )
}

fn all_statuses() -> Vec<UserPresence> {
    let mut presences = vec![
        UserPresence::with_status(PresenceStatus::None),
        UserPresence::new(PresenceStatus::Recently, NOW - 10),
        UserPresence::new(PresenceStatus::Recently, NOW - 40),
        UserPresence::with_status(PresenceStatus::LastWeek),
        UserPresence::with_status(PresenceStatus::LastMonth),
    ];
    for offset in [
        86_400, 1, 0, -1, -30, -59, -60, -3599, -3600, -50_000, -86_400, -400_000, -40_000_000,
    ] {
        presences.push(UserPresence::with_status(PresenceStatus::Present(NOW + offset)));
    }
    presences
}

// ============================================
// String Tables
// ============================================

#[test]
fn test_russian_plurals() {
    let formatter = russian_formatter();
    let render = |at| {
        formatter
            .string_and_activity_for_user_presence(
                &UserPresence::with_status(PresenceStatus::Present(at)),
                NOW,
            )
            .0
    };

    assert_eq!(render(NOW - 60), "был(а) 1 минуту назад");
    assert_eq!(render(NOW - 3 * 60), "был(а) 3 минуты назад");
    assert_eq!(render(NOW - 11 * 60), "был(а) 11 минут назад");
    assert_eq!(render(NOW - 21 * 60), "был(а) 21 минуту назад");
    assert_eq!(render(NOW - 2 * 3600), "был(а) 2 часа назад");
    // 2024-03-14 14:30 UTC
    assert_eq!(render(1_710_426_600), "был(а) вчера в 14:30");
}

#[test]
fn test_russian_weekdays_and_fallback() {
    let formatter = russian_formatter();
    // 2024-03-12 08:05 UTC, a Tuesday
    assert_eq!(formatter.string_for_relative_timestamp(1_710_230_700, NOW), "вт");
    // Not translated in the fixture: English text is used
    assert_eq!(
        formatter.string_for_relative_live_location_timestamp(NOW - 10, NOW),
        "updated just now"
    );
}

#[test]
fn test_russian_mute_interval() {
    let formatter = russian_formatter();
    let clock = FixedClock(NOW);
    assert_eq!(
        formatter.string_for_remaining_mute_interval(NOW + 5 * 86_400, &clock),
        "выкл. на 5 дней"
    );
    assert_eq!(
        formatter.string_for_remaining_mute_interval(NOW + 22 * 3600, &clock),
        "выкл. на 22 часа"
    );
}

#[test]
fn test_broken_string_table() {
    let err = Strings::load_from(&fixture_path("broken.toml")).unwrap_err();
    match err {
        Error::Strings { path, .. } => assert!(path.ends_with("broken.toml")),
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================
// Configuration
// ============================================

#[test]
fn test_config_with_string_table() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[format]
date_separator = "."
date_format = "day_first"
time_format = "military"

[strings]
path = "{}"
"#,
            fixture_path("ru.toml").display()
        ),
    )
    .unwrap();

    let config = Config::load_from(&config_path).expect("config should load");
    let strings = config.strings().expect("strings should load");
    assert_eq!(strings.language(), "ru");

    let formatter =
        PresenceFormatter::with_calendar(strings, config.format, FixedOffsetCalendar::utc());
    // 2023-12-31 23:00 UTC
    let (text, online) = formatter.string_and_activity_for_user_presence(
        &UserPresence::with_status(PresenceStatus::Present(1_704_063_600)),
        NOW,
    );
    assert_eq!(text, "был(а) 31.12.23");
    assert!(!online);
}

#[test]
fn test_config_rejects_empty_separator() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[format]\ndate_separator = \"\"\n").unwrap();

    let err = Config::load_from(&config_path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_config_missing_string_table() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[strings]\npath = \"/nonexistent/strings.toml\"\n").unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert!(matches!(config.strings(), Err(Error::Strings { .. })));
}

// ============================================
// Classification and Rendering Agree
// ============================================

#[test]
fn test_every_status_renders() {
    let formatter = PresenceFormatter::with_calendar(
        Strings::english(),
        DateTimeFormat::default(),
        FixedOffsetCalendar::east(-5 * 3600).unwrap(),
    );

    for presence in all_statuses() {
        let status = relative_user_presence_status(&presence, NOW);
        let timeout = user_presence_string_refresh_timeout(&presence, NOW);
        let (text, online) = formatter.string_and_activity_for_user_presence(&presence, NOW);

        assert!(!text.is_empty(), "{presence:?} rendered empty");
        assert_eq!(online, status.is_online(), "{presence:?} online flag");
        assert!(timeout >= 0.0, "{presence:?} negative timeout");

        if let RelativeUserPresenceStatus::Online(until) = status {
            assert_eq!(text, "online");
            assert!(until >= NOW);
        }
    }
}

#[test]
fn test_timestamp_strings_never_empty() {
    let formatter = PresenceFormatter::with_calendar(
        Strings::english(),
        DateTimeFormat::default(),
        FixedOffsetCalendar::utc(),
    );
    let clock = FixedClock(NOW);

    for offset in [0, -59, -3600, -86_400, -6 * 86_400, -30 * 86_400, -400 * 86_400] {
        let ts = NOW + offset;
        assert!(!formatter.human_readable_string_for_timestamp(ts, &clock).is_empty());
        assert!(!formatter.string_for_relative_timestamp(ts, NOW).is_empty());
        assert!(!formatter
            .string_for_relative_live_location_timestamp(ts, NOW)
            .is_empty());
    }
}
