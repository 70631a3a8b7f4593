//! Localized string table
//!
//! Strings are looked up by stable key. Templates use positional
//! placeholders (`{0}`, `{1}`, ...). Pluralized keys are stored once per
//! plural category with a suffix (`LastSeen_MinutesAgo_one`,
//! `LastSeen_MinutesAgo_other`, ...).
//!
//! Translation files are TOML:
//!
//! ```toml
//! language = "de"
//!
//! [strings]
//! LastSeen_JustNow = "zuletzt gerade eben online"
//! LastSeen_MinutesAgo_one = "zuletzt vor {0} Minute online"
//! LastSeen_MinutesAgo_other = "zuletzt vor {0} Minuten online"
//! ```
//!
//! Keys a translation omits fall back to the built-in English table.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Stable string keys.
pub mod keys {
    pub const LAST_SEEN_OFFLINE: &str = "LastSeen_Offline";
    pub const PRESENCE_ONLINE: &str = "Presence_online";
    pub const LAST_SEEN_JUST_NOW: &str = "LastSeen_JustNow";
    pub const LAST_SEEN_MINUTES_AGO: &str = "LastSeen_MinutesAgo";
    pub const LAST_SEEN_HOURS_AGO: &str = "LastSeen_HoursAgo";
    pub const LAST_SEEN_YESTERDAY_AT: &str = "LastSeen_YesterdayAt";
    pub const LAST_SEEN_AT_DATE: &str = "LastSeen_AtDate";
    pub const LAST_SEEN_LATELY: &str = "LastSeen_Lately";
    pub const LAST_SEEN_WITHIN_A_WEEK: &str = "LastSeen_WithinAWeek";
    pub const LAST_SEEN_WITHIN_A_MONTH: &str = "LastSeen_WithinAMonth";

    pub const TIME_TODAY_AT: &str = "Time_TodayAt";
    pub const TIME_YESTERDAY_AT: &str = "Time_YesterdayAt";
    pub const TIME_FULL_DATE: &str = "Time_FullDate";

    pub const LIVE_LOCATION_UPDATED_JUST_NOW: &str = "LiveLocationUpdated_JustNow";
    pub const LIVE_LOCATION_UPDATED_MINUTES_AGO: &str = "LiveLocationUpdated_MinutesAgo";
    pub const LIVE_LOCATION_UPDATED_TODAY_AT: &str = "LiveLocationUpdated_TodayAt";

    pub const MUTE_EXPIRES_MINUTES: &str = "MuteExpires_Minutes";
    pub const MUTE_EXPIRES_HOURS: &str = "MuteExpires_Hours";
    pub const MUTE_EXPIRES_DAYS: &str = "MuteExpires_Days";

    /// Indexed by day of week, Sunday first.
    pub const WEEKDAY_SHORT: [&str; 7] = [
        "Weekday_ShortSunday",
        "Weekday_ShortMonday",
        "Weekday_ShortTuesday",
        "Weekday_ShortWednesday",
        "Weekday_ShortThursday",
        "Weekday_ShortFriday",
        "Weekday_ShortSaturday",
    ];

    /// Indexed by 0-based month.
    pub const MONTH_GEN: [&str; 12] = [
        "Month_GenJanuary",
        "Month_GenFebruary",
        "Month_GenMarch",
        "Month_GenApril",
        "Month_GenMay",
        "Month_GenJune",
        "Month_GenJuly",
        "Month_GenAugust",
        "Month_GenSeptember",
        "Month_GenOctober",
        "Month_GenNovember",
        "Month_GenDecember",
    ];
}

const ENGLISH: &[(&str, &str)] = &[
    ("LastSeen_Offline", "last seen a long time ago"),
    ("Presence_online", "online"),
    ("LastSeen_JustNow", "last seen just now"),
    ("LastSeen_MinutesAgo_one", "last seen {0} minute ago"),
    ("LastSeen_MinutesAgo_other", "last seen {0} minutes ago"),
    ("LastSeen_HoursAgo_one", "last seen {0} hour ago"),
    ("LastSeen_HoursAgo_other", "last seen {0} hours ago"),
    ("LastSeen_YesterdayAt", "last seen yesterday at {0}"),
    ("LastSeen_AtDate", "last seen {0}"),
    ("LastSeen_Lately", "last seen recently"),
    ("LastSeen_WithinAWeek", "last seen within a week"),
    ("LastSeen_WithinAMonth", "last seen within a month"),
    ("Time_TodayAt", "today at {0}"),
    ("Time_YesterdayAt", "yesterday at {0}"),
    ("Time_FullDate", "{0} {1}, {2} at {3}"),
    ("LiveLocationUpdated_JustNow", "updated just now"),
    ("LiveLocationUpdated_MinutesAgo_one", "updated {0} minute ago"),
    ("LiveLocationUpdated_MinutesAgo_other", "updated {0} minutes ago"),
    ("LiveLocationUpdated_TodayAt", "updated today at {0}"),
    ("MuteExpires_Minutes_one", "muted for {0} minute"),
    ("MuteExpires_Minutes_other", "muted for {0} minutes"),
    ("MuteExpires_Hours_one", "muted for {0} hour"),
    ("MuteExpires_Hours_other", "muted for {0} hours"),
    ("MuteExpires_Days_one", "muted for {0} day"),
    ("MuteExpires_Days_other", "muted for {0} days"),
    ("Weekday_ShortSunday", "Sun"),
    ("Weekday_ShortMonday", "Mon"),
    ("Weekday_ShortTuesday", "Tue"),
    ("Weekday_ShortWednesday", "Wed"),
    ("Weekday_ShortThursday", "Thu"),
    ("Weekday_ShortFriday", "Fri"),
    ("Weekday_ShortSaturday", "Sat"),
    ("Month_GenJanuary", "January"),
    ("Month_GenFebruary", "February"),
    ("Month_GenMarch", "March"),
    ("Month_GenApril", "April"),
    ("Month_GenMay", "May"),
    ("Month_GenJune", "June"),
    ("Month_GenJuly", "July"),
    ("Month_GenAugust", "August"),
    ("Month_GenSeptember", "September"),
    ("Month_GenOctober", "October"),
    ("Month_GenNovember", "November"),
    ("Month_GenDecember", "December"),
];

// ============================================
// Plural Rules
// ============================================

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn suffix(&self) -> &'static str {
        match self {
            PluralCategory::One => "one",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

/// How a language maps integer counts onto plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PluralRule {
    /// one / other
    #[default]
    English,
    /// one / few / many (Russian, Ukrainian, ...)
    Slavic,
    /// other only
    Invariant,
}

impl PluralRule {
    /// Picks the rule for a language code such as `ru` or `pt-BR`.
    pub fn for_language(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match primary.as_str() {
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => PluralRule::Slavic,
            "ja" | "zh" | "ko" | "id" | "th" | "vi" => PluralRule::Invariant,
            _ => PluralRule::English,
        }
    }

    pub fn category(&self, count: i64) -> PluralCategory {
        let n = count.unsigned_abs();
        match self {
            PluralRule::English => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            PluralRule::Slavic => {
                let mod10 = n % 10;
                let mod100 = n % 100;
                if mod10 == 1 && mod100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::Invariant => PluralCategory::Other,
        }
    }
}

// ============================================
// String Table
// ============================================

#[derive(Debug, Deserialize)]
struct StringsFile {
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    strings: HashMap<String, String>,
}

fn default_language() -> String {
    "en".to_string()
}

/// A localized string table.
#[derive(Debug, Clone)]
pub struct Strings {
    language: String,
    plural_rule: PluralRule,
    entries: HashMap<String, String>,
}

impl Default for Strings {
    fn default() -> Self {
        Self::english()
    }
}

impl Strings {
    /// The built-in English table.
    pub fn english() -> Self {
        Self {
            language: default_language(),
            plural_rule: PluralRule::English,
            entries: ENGLISH
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Builds a table for `language`, overlaying `overrides` on the English one.
    pub fn with_overrides(language: &str, overrides: HashMap<String, String>) -> Self {
        let mut strings = Self::english();
        strings.language = language.to_string();
        strings.plural_rule = PluralRule::for_language(language);
        strings.entries.extend(overrides);
        strings
    }

    /// Parses a TOML translation file's contents.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: StringsFile = toml::from_str(content)?;
        Ok(Self::with_overrides(&file.language, file.strings))
    }

    /// Loads a TOML translation file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Strings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let strings = Self::from_toml_str(&content).map_err(|e| Error::Strings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            language = %strings.language,
            entries = strings.entries.len(),
            "Loaded string table"
        );

        Ok(strings)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Literal string for `key`.
    ///
    /// A missing key renders as the key itself.
    pub fn get(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(key, language = %self.language, "Missing localized string");
                key.to_string()
            }
        }
    }

    /// Renders the template for `key` with positional arguments.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        substitute(&self.get(key), args)
    }

    /// Renders the plural form of `key` that matches `count`.
    ///
    /// `{0}` is the count; further arguments follow as `{1}`, `{2}`, ...
    pub fn plural(&self, key: &str, count: i64, args: &[&str]) -> String {
        let category = self.plural_rule.category(count);
        let template = self
            .entries
            .get(&format!("{}_{}", key, category.suffix()))
            .or_else(|| self.entries.get(&format!("{}_other", key)))
            .cloned()
            .unwrap_or_else(|| self.get(key));

        let count = count.to_string();
        let mut all_args = Vec::with_capacity(args.len() + 1);
        all_args.push(count.as_str());
        all_args.extend_from_slice(args);
        substitute(&template, &all_args)
    }
}

/// Replaces `{N}` placeholders; unknown indices are left as-is.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let index: usize = after[..end].parse().ok()?;
            args.get(index).map(|value| (value, end))
        });

        match replaced {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_has_every_key() {
        let strings = Strings::english();
        for key in keys::WEEKDAY_SHORT.iter().chain(keys::MONTH_GEN.iter()) {
            assert_ne!(strings.get(key), *key);
        }
        assert_eq!(strings.get(keys::PRESENCE_ONLINE), "online");
    }

    #[test]
    fn test_substitute() {
        assert_eq!(substitute("today at {0}", &["14:30"]), "today at 14:30");
        assert_eq!(substitute("{1} then {0}", &["a", "b"]), "b then a");
        assert_eq!(substitute("{2} stays", &["a"]), "{2} stays");
        assert_eq!(substitute("{x} and {", &["a"]), "{x} and {");
    }

    #[test]
    fn test_english_plural() {
        let strings = Strings::english();
        assert_eq!(
            strings.plural(keys::LAST_SEEN_MINUTES_AGO, 1, &[]),
            "last seen 1 minute ago"
        );
        assert_eq!(
            strings.plural(keys::LAST_SEEN_MINUTES_AGO, 5, &[]),
            "last seen 5 minutes ago"
        );
        assert_eq!(strings.plural(keys::MUTE_EXPIRES_DAYS, 0, &[]), "muted for 0 days");
    }

    #[test]
    fn test_slavic_categories() {
        let rule = PluralRule::Slavic;
        assert_eq!(rule.category(1), PluralCategory::One);
        assert_eq!(rule.category(21), PluralCategory::One);
        assert_eq!(rule.category(11), PluralCategory::Many);
        assert_eq!(rule.category(3), PluralCategory::Few);
        assert_eq!(rule.category(13), PluralCategory::Many);
        assert_eq!(rule.category(25), PluralCategory::Many);
    }

    #[test]
    fn test_rule_for_language() {
        assert_eq!(PluralRule::for_language("ru"), PluralRule::Slavic);
        assert_eq!(PluralRule::for_language("uk-UA"), PluralRule::Slavic);
        assert_eq!(PluralRule::for_language("ja"), PluralRule::Invariant);
        assert_eq!(PluralRule::for_language("pt_BR"), PluralRule::English);
    }

    #[test]
    fn test_plural_falls_back_to_other() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "LastSeen_MinutesAgo_other".to_string(),
            "{0} 分前".to_string(),
        );
        let strings = Strings::with_overrides("ja", overrides);
        assert_eq!(strings.plural(keys::LAST_SEEN_MINUTES_AGO, 1, &[]), "1 分前");
    }

    #[test]
    fn test_from_toml_overlays_english() {
        let strings = Strings::from_toml_str(
            r#"
language = "ru"

[strings]
Presence_online = "в сети"
LastSeen_MinutesAgo_one = "был(а) {0} минуту назад"
LastSeen_MinutesAgo_few = "был(а) {0} минуты назад"
LastSeen_MinutesAgo_many = "был(а) {0} минут назад"
"#,
        )
        .unwrap();

        assert_eq!(strings.language(), "ru");
        assert_eq!(strings.plural_rule(), PluralRule::Slavic);
        assert_eq!(strings.get(keys::PRESENCE_ONLINE), "в сети");
        assert_eq!(
            strings.plural(keys::LAST_SEEN_MINUTES_AGO, 22, &[]),
            "был(а) 22 минуты назад"
        );
        // Untranslated keys keep the English text
        assert_eq!(strings.get(keys::LAST_SEEN_LATELY), "last seen recently");
    }

    #[test]
    fn test_missing_key_renders_key() {
        let strings = Strings::english();
        assert_eq!(strings.get("Nope_Missing"), "Nope_Missing");
        assert_eq!(strings.format("Nope_Missing", &["x"]), "Nope_Missing");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Strings::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Strings { .. }));
    }
}
