//! Locale-bound numeric date formatting

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// Locale used when a document declares none or declares an invalid one
pub const DEFAULT_LOCALE: &str = "en-GB";

lazy_static! {
    /// Loose BCP 47 shape: primary language subtag followed by alphanumeric subtags
    static ref LOCALE_TAG: Regex = Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

/// Field order plus the separators a locale places between and after fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DatePattern {
    order: FieldOrder,
    separator: &'static str,
    suffix: &'static str,
}

impl DatePattern {
    const fn new(order: FieldOrder, separator: &'static str) -> Self {
        Self {
            order,
            separator,
            suffix: "",
        }
    }

    const fn with_suffix(self, suffix: &'static str) -> Self {
        Self { suffix, ..self }
    }

    fn render(&self, date: NaiveDate) -> String {
        let day = date.format("%d").to_string();
        let month = date.format("%m").to_string();
        let year = date.format("%Y").to_string();
        let fields = match self.order {
            FieldOrder::DayMonthYear => [day, month, year],
            FieldOrder::MonthDayYear => [month, day, year],
            FieldOrder::YearMonthDay => [year, month, day],
        };
        format!("{}{}", fields.join(self.separator), self.suffix)
    }
}

const DMY_SLASH: DatePattern = DatePattern::new(FieldOrder::DayMonthYear, "/");
const DMY_DOT: DatePattern = DatePattern::new(FieldOrder::DayMonthYear, ".");
const DMY_DASH: DatePattern = DatePattern::new(FieldOrder::DayMonthYear, "-");
const MDY_SLASH: DatePattern = DatePattern::new(FieldOrder::MonthDayYear, "/");
const YMD_DASH: DatePattern = DatePattern::new(FieldOrder::YearMonthDay, "-");
const YMD_SLASH: DatePattern = DatePattern::new(FieldOrder::YearMonthDay, "/");
const YMD_DOT_SPACED: DatePattern =
    DatePattern::new(FieldOrder::YearMonthDay, ". ").with_suffix(".");
const DMY_DOT_SPACED: DatePattern = DatePattern::new(FieldOrder::DayMonthYear, ". ");

/// Region-specific overrides, matched case-insensitively against the full tag
fn pattern_for_tag(tag: &str) -> Option<DatePattern> {
    let pattern = match tag.to_ascii_lowercase().as_str() {
        "en-us" | "en-ph" => MDY_SLASH,
        "en-ca" => YMD_DASH,
        "fr-ca" => YMD_DASH,
        "de-ch" => DMY_DOT,
        _ => return None,
    };
    Some(pattern)
}

fn pattern_for_language(language: &str) -> Option<DatePattern> {
    let pattern = match language.to_ascii_lowercase().as_str() {
        "en" | "fr" | "es" | "it" | "pt" | "el" | "ga" => DMY_SLASH,
        "nb" | "nn" | "no" | "de" | "da" | "fi" | "is" | "pl" | "ru" | "uk" | "tr" | "et"
        | "ro" => DMY_DOT,
        "cs" | "sk" => DMY_DOT_SPACED,
        "nl" => DMY_DASH,
        "sv" | "lt" => YMD_DASH,
        "ja" | "zh" => YMD_SLASH,
        "hu" | "ko" => YMD_DOT_SPACED,
        _ => return None,
    };
    Some(pattern)
}

/// Formats calendar dates the way a locale writes them numerically
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    locale: String,
    pattern: DatePattern,
}

impl DateFormatter {
    /// Build a formatter for `locale`, falling back to `default_locale` when
    /// the tag is malformed.
    pub fn new(locale: &str, default_locale: &str) -> Self {
        if LOCALE_TAG.is_match(locale) {
            return Self::resolved(locale, default_locale);
        }
        tracing::warn!(
            "Falling back to {} date formatter, invalid locale '{}'",
            default_locale,
            locale
        );
        Self::resolved(default_locale, DEFAULT_LOCALE)
    }

    fn resolved(locale: &str, default_locale: &str) -> Self {
        let pattern = Self::lookup(locale)
            .or_else(|| Self::lookup(default_locale))
            .unwrap_or(DMY_SLASH);
        Self {
            locale: locale.to_string(),
            pattern,
        }
    }

    fn lookup(locale: &str) -> Option<DatePattern> {
        let language = locale.split('-').next().unwrap_or(locale);
        pattern_for_tag(locale).or_else(|| pattern_for_language(language))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn format(&self, date: NaiveDate) -> String {
        self.pattern.render(date)
    }

    /// Parse and format a form date. Empty or unparsable input yields `None`.
    pub fn format_input(&self, value: &str) -> Option<String> {
        parse_date(value).map(|date| self.format(date))
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, DEFAULT_LOCALE)
    }
}

/// Parse an ISO calendar date or an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

/// Today's calendar date in UTC as `YYYY-MM-DD`
pub fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
