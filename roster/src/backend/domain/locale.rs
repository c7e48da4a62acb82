//! Locale-aware date formatting.
//!
//! Day and month names come from chrono's localized formatting, except the
//! full Portuguese weekday names: chrono's pt-BR table drops the "-feira"
//! suffix, so those are substituted before formatting. The rest of
//! the domain only talks to the [`DateFormatter`] trait, so labels are always
//! derived from a date through one place.

use chrono::{Datelike, Locale, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Locales the roster can render labels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RosterLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl RosterLocale {
    pub fn chrono_locale(&self) -> Locale {
        match self {
            RosterLocale::PtBr => Locale::pt_BR,
            RosterLocale::EnUs => Locale::en_US,
        }
    }

    /// strftime pattern of the "weekday, day of month of year" long form
    pub fn long_date_pattern(&self) -> &'static str {
        match self {
            RosterLocale::PtBr => "%A, %-d de %B de %Y",
            RosterLocale::EnUs => "%A, %-d of %B of %Y",
        }
    }

    /// Full weekday name when chrono's table does not spell it out
    pub fn full_weekday_name(&self, weekday: Weekday) -> Option<&'static str> {
        match self {
            RosterLocale::PtBr => Some(match weekday {
                Weekday::Mon => "segunda-feira",
                Weekday::Tue => "terça-feira",
                Weekday::Wed => "quarta-feira",
                Weekday::Thu => "quinta-feira",
                Weekday::Fri => "sexta-feira",
                Weekday::Sat => "sábado",
                Weekday::Sun => "domingo",
            }),
            RosterLocale::EnUs => None,
        }
    }

    /// Leader shown for field-service dates nobody was assigned to
    pub fn unassigned_leader(&self) -> &'static str {
        match self {
            RosterLocale::PtBr => "A definir",
            RosterLocale::EnUs => "to be determined",
        }
    }
}

/// Formats dates with a target locale's weekday and month names
pub trait DateFormatter: Send + Sync {
    /// Format `date` with a strftime-style `pattern`
    fn format(&self, date: NaiveDate, pattern: &str) -> String;

    /// Pattern used by [`DateFormatter::long_date`]
    fn long_date_pattern(&self) -> &str;

    /// Placeholder leader for an empty field-service rotation
    fn unassigned_leader(&self) -> &str;

    fn weekday_short(&self, date: NaiveDate) -> String {
        self.format(date, "%a")
    }

    fn month_short(&self, date: NaiveDate) -> String {
        self.format(date, "%b")
    }

    fn weekday_name(&self, date: NaiveDate) -> String {
        self.format(date, "%A")
    }

    fn month_name(&self, date: NaiveDate) -> String {
        self.format(date, "%B")
    }

    /// "weekday, D of month of year" in the locale's wording
    fn long_date(&self, date: NaiveDate) -> String {
        self.format(date, self.long_date_pattern())
    }

    /// Month name with its first letter upper-cased
    fn month_label(&self, date: NaiveDate) -> String {
        capitalize(&self.month_name(date))
    }
}

/// [`DateFormatter`] backed by chrono's locale tables
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter {
    locale: RosterLocale,
}

impl LocaleFormatter {
    pub fn new(locale: RosterLocale) -> Self {
        Self { locale }
    }
}

impl DateFormatter for LocaleFormatter {
    fn format(&self, date: NaiveDate, pattern: &str) -> String {
        let pattern = match self.locale.full_weekday_name(date.weekday()) {
            Some(name) if pattern.contains("%A") => Cow::Owned(pattern.replace("%A", name)),
            _ => Cow::Borrowed(pattern),
        };
        date.and_time(NaiveTime::default())
            .and_utc()
            .format_localized(&pattern, self.locale.chrono_locale())
            .to_string()
    }

    fn long_date_pattern(&self) -> &str {
        self.locale.long_date_pattern()
    }

    fn unassigned_leader(&self) -> &str {
        self.locale.unassigned_leader()
    }
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
