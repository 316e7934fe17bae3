use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

const DURATION_MULTIPLIERS: [u64; 4] = [1, 60, 60 * 60, 24 * 60 * 60];

// `xx-xx` anywhere in a language code means it already carries a region
static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[A-Za-z0-9_]{2}-[A-Za-z0-9_]{2}").expect("valid regex"));

// Shortest `<...>` run, newlines included
static HTML_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("valid regex"));

static LEADING_DIGITS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+?([0-9]+)").expect("valid regex"));

/// Lenient integer parse: leading whitespace is skipped and the longest run of
/// ASCII digits is used, so `"1440 minutes"` yields 1440. `None` without digits.
pub fn parse_leading_int(raw: &str) -> Option<u64> {
    LEADING_DIGITS_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
}

/// Converts `itunes:duration` text to seconds.
///
/// Accepts bare seconds (`"424"`), `mm:ss`, `hh:mm:ss` and `dd:hh:mm:ss`.
/// A segment without digits, or more than four segments, gives `None`.
pub fn parse_itunes_duration(raw: &str) -> Option<u64> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() > DURATION_MULTIPLIERS.len() {
        return None;
    }

    parts
        .iter()
        .rev()
        .zip(DURATION_MULTIPLIERS)
        .try_fold(0_u64, |acc, (part, multiplier)| {
            let value = parse_leading_int(part)?;
            acc.checked_add(value.checked_mul(multiplier)?)
        })
}

/// Canonical lowercase locale tag: `en` → `en-us`, `de` → `de-de`,
/// `en-GB` → `en-gb`.
pub fn normalize_language(raw: &str) -> String {
    let code = raw.trim();
    let full = if LANGUAGE_PATTERN.is_match(code) {
        code.to_string()
    } else if code == "en" {
        "en-US".to_string()
    } else {
        format!("{}-{}", code, code.to_uppercase())
    };
    full.to_lowercase()
}

/// `itunes:explicit` is only ever `yes` for explicit content; `clean`, `no`
/// and anything else count as not explicit.
pub fn is_explicit(raw: &str) -> bool {
    raw.trim().to_lowercase() == "yes"
}

/// Drops every `<...>` run from the text, including runs spanning lines. A
/// `<` with no later `>` is kept as-is.
pub fn strip_html(raw: &str) -> String {
    HTML_TAG_PATTERN.replace_all(raw, "").into_owned()
}

pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(num) = t.parse::<i64>() {
        return DateTime::from_timestamp(num, 0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(t)
        .or_else(|_| DateTime::parse_from_rfc3339(t))
        .or_else(|_| DateTime::parse_from_str(t, "%a, %d %b %Y %H:%M:%S %z"))
        .or_else(|_| DateTime::parse_from_str(t, "%a, %d %b %Y %H:%M %z"))
        .or_else(|_| DateTime::parse_from_str(t, "%d %b %Y %H:%M:%S %z"))
    {
        return Some(dt.with_timezone(&Utc));
    }

    // Zone-less or named-zone variants are taken as UTC.
    let naive = t
        .trim_end_matches(" GMT")
        .trim_end_matches(" UTC")
        .trim_end_matches(" UT")
        .trim_end_matches('Z');
    NaiveDateTime::parse_from_str(naive, "%a, %d %b %Y %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(naive, "%d %b %Y %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDate::parse_from_str(naive, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map(|dt| dt.and_utc())
        .ok()
}
