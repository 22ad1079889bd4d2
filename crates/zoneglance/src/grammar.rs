//! Locale-aware natural-language date matching.
//!
//! This is the lowest-priority strategy: anything the strict matchers reject
//! lands here. A trailing zone abbreviation or numeric UTC offset is peeled
//! off first (it re-anchors the reference and populates
//! `source_offset_minutes`), then anchored day expressions ("tomorrow at
//! 5pm") are resolved directly, and everything else is handed to the
//! [`interim`] grammar engine with the locale's dialect. Engine failures are
//! no-matches, never errors.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use interim::{parse_date_string, Dialect};
use regex::Regex;

use crate::locale::DateGrammar;
use crate::matchers::DateMatcher;
use crate::parser::ParseResult;

/// Trailing numeric UTC offset: "+02:00", "-0530", "UTC+5", "GMT-3".
static NUMERIC_OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:utc|gmt)?([+-])(\d{1,2})(?::?(\d{2}))?$").expect("valid offset pattern")
});

/// The general natural-language strategy, parameterized by locale grammar.
pub struct NaturalLanguage {
    grammar: DateGrammar,
}

impl NaturalLanguage {
    pub fn new(grammar: DateGrammar) -> Self {
        Self { grammar }
    }
}

impl DateMatcher for NaturalLanguage {
    fn try_match(&self, text: &str, reference: &DateTime<Tz>) -> Option<ParseResult> {
        let (remainder, offset_minutes) = split_offset_suffix(text);

        let instant = match offset_minutes {
            Some(minutes) => {
                // Re-anchor the reference at the explicit fixed offset so the
                // wall-clock fields of the expression land in the source zone.
                let fixed = FixedOffset::east_opt(minutes * 60)?;
                resolve_in_zone(remainder, reference.with_timezone(&fixed), self.grammar.dialect())?
            }
            None => resolve_in_zone(remainder, reference.clone(), self.grammar.dialect())?,
        };

        Some(ParseResult {
            instant,
            matched_text: text.to_string(),
            span_start: 0,
            span_end: text.len(),
            source_offset_minutes: offset_minutes,
        })
    }
}

/// Resolve an expression to an instant, interpreting wall-clock fields in the
/// reference's zone.
fn resolve_in_zone<Z: TimeZone>(
    text: &str,
    reference: DateTime<Z>,
    dialect: Dialect,
) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if let Some(resolved) = try_anchored(&lowered, &reference) {
        return Some(resolved.with_timezone(&Utc));
    }

    // "in 2 hours" → "2 hours"; the engine reads bare durations as forward.
    // The engine gets the original casing: ISO 8601 designators (`T`, `Z`)
    // are case-sensitive to it.
    let stripped = match trimmed.get(..3) {
        Some(head) if head.eq_ignore_ascii_case("in ") => &trimmed[3..],
        _ => trimmed,
    };

    parse_date_string(stripped, reference, dialect)
        .ok()
        .map(|resolved| resolved.with_timezone(&Utc))
}

/// Anchored day references: "now", "today", "tomorrow", "yesterday",
/// optionally followed by "at <time>", a bare time, or a named time of day.
fn try_anchored<Z: TimeZone>(s: &str, reference: &DateTime<Z>) -> Option<DateTime<Z>> {
    let (anchor, rest) = match s.split_once(' ') {
        Some((head, tail)) => (head, Some(tail.trim())),
        None => (s, None),
    };

    if anchor == "now" && rest.is_none() {
        return Some(reference.clone());
    }

    let date = match anchor {
        "today" => reference.date_naive(),
        "tomorrow" => reference.date_naive().succ_opt()?,
        "yesterday" => reference.date_naive().pred_opt()?,
        _ => return None,
    };

    let time = match rest {
        None => NaiveTime::MIN,
        Some(rest) => {
            let spec = rest.strip_prefix("at ").unwrap_or(rest);
            named_time(spec).or_else(|| parse_time_of_day(spec))?
        }
    };

    reference
        .timezone()
        .from_local_datetime(&date.and_time(time))
        .earliest()
}

/// Map a named time of day to a wall-clock time.
fn named_time(s: &str) -> Option<NaiveTime> {
    match s {
        "morning" => NaiveTime::from_hms_opt(9, 0, 0),
        "noon" => NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => NaiveTime::from_hms_opt(13, 0, 0),
        "evening" => NaiveTime::from_hms_opt(18, 0, 0),
        "night" => NaiveTime::from_hms_opt(21, 0, 0),
        "midnight" => NaiveTime::from_hms_opt(0, 0, 0),
        _ => None,
    }
}

/// Parse a time string: "5pm", "2:30pm", "14:00", "14:30:00".
fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Some(t);
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(t);
    }

    let compact = s.replace(' ', "");
    let (time_part, is_pm) = if let Some(head) = compact.strip_suffix("pm") {
        (head, true)
    } else if let Some(head) = compact.strip_suffix("am") {
        (head, false)
    } else {
        return None;
    };

    let mut parts = time_part.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0,
    };

    let hour24 = match (hour, is_pm) {
        (12, true) => 12,
        (12, false) => 0,
        (h, true) if h < 12 => h + 12,
        (h, false) if h < 12 => h,
        _ => return None,
    };

    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Split a trailing zone abbreviation or numeric offset off the text.
///
/// Returns the remaining expression and the offset in minutes. The remainder
/// must be non-empty — a bare abbreviation is not a date expression.
fn split_offset_suffix(text: &str) -> (&str, Option<i32>) {
    let trimmed = text.trim_end();
    let Some(idx) = trimmed.rfind(char::is_whitespace) else {
        return (text, None);
    };
    let token = trimmed[idx..].trim_start();
    let head = trimmed[..idx].trim_end();
    if head.is_empty() {
        return (text, None);
    }

    if let Some(minutes) = zone_abbreviation_minutes(token) {
        return (head, Some(minutes));
    }
    if let Some(minutes) = numeric_offset_minutes(token) {
        return (head, Some(minutes));
    }
    (text, None)
}

/// Fixed offset for a zone abbreviation, in minutes east of UTC.
///
/// Ambiguous abbreviations resolve to one canonical offset each ("CST" is US
/// Central, "IST" is India) — no disambiguation from surrounding text.
fn zone_abbreviation_minutes(token: &str) -> Option<i32> {
    let minutes = match token.to_ascii_uppercase().as_str() {
        "UTC" | "UT" | "GMT" | "Z" => 0,
        "EST" => -300,
        "EDT" => -240,
        "CST" => -360,
        "CDT" => -300,
        "MST" => -420,
        "MDT" => -360,
        "PST" => -480,
        "PDT" => -420,
        "AKST" => -540,
        "AKDT" => -480,
        "HST" => -600,
        "AST" => -240,
        "BRT" | "ART" => -180,
        "WET" => 0,
        "WEST" | "BST" => 60,
        "CET" => 60,
        "CEST" => 120,
        "EET" => 120,
        "EEST" | "MSK" => 180,
        "IST" => 330,
        "ICT" => 420,
        "HKT" | "SGT" | "AWST" => 480,
        "JST" | "KST" => 540,
        "ACST" => 570,
        "AEST" => 600,
        "AEDT" => 660,
        "NZST" => 720,
        "NZDT" => 780,
        _ => return None,
    };
    Some(minutes)
}

/// Parse a trailing numeric offset token to minutes east of UTC.
fn numeric_offset_minutes(token: &str) -> Option<i32> {
    let caps = NUMERIC_OFFSET_RE.captures(token)?;
    let sign = if &caps[1] == "-" { -1 } else { 1 };
    let hours: i32 = caps[2].parse().ok()?;
    let minutes: i32 = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if hours > 14 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::DateGrammar;
    use chrono::{Datelike, Timelike};

    fn reference() -> DateTime<Tz> {
        chrono_tz::UTC.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
    }

    fn natural() -> NaturalLanguage {
        NaturalLanguage::new(DateGrammar::EnUs)
    }

    // ── Zone abbreviations and offsets ──────────────────────────────────

    #[test]
    fn zone_abbreviation_est() {
        let result = natural().try_match("5pm EST", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 22);
        assert_eq!(result.source_offset_minutes, Some(-300));
    }

    #[test]
    fn zone_abbreviation_cet() {
        let result = natural().try_match("5pm CET", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 16);
        assert_eq!(result.source_offset_minutes, Some(60));
    }

    #[test]
    fn zone_abbreviation_jst() {
        let result = natural().try_match("5pm JST", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 8);
        assert_eq!(result.source_offset_minutes, Some(540));
    }

    #[test]
    fn zone_abbreviation_is_case_insensitive() {
        let result = natural().try_match("5pm est", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 22);
    }

    #[test]
    fn numeric_offset_suffix() {
        let result = natural()
            .try_match("2017-06-30 08:20:30 +02:00", &reference())
            .unwrap();
        assert_eq!(
            result.instant.to_rfc3339(),
            "2017-06-30T06:20:30+00:00"
        );
        assert_eq!(result.source_offset_minutes, Some(120));
    }

    #[test]
    fn utc_prefixed_offset_suffix() {
        let result = natural().try_match("5pm UTC+5", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 12);
        assert_eq!(result.source_offset_minutes, Some(300));
    }

    #[test]
    fn bare_abbreviation_is_not_a_date() {
        assert!(natural().try_match("EST", &reference()).is_none());
    }

    #[test]
    fn no_offset_reported_without_zone_token() {
        let result = natural().try_match("tomorrow at 5pm", &reference()).unwrap();
        assert_eq!(result.source_offset_minutes, None);
    }

    // ── Anchored expressions ────────────────────────────────────────────

    #[test]
    fn tomorrow_at_informal_time() {
        let result = natural().try_match("tomorrow at 5pm", &reference()).unwrap();
        assert_eq!(result.instant.date_naive().day(), 2);
        assert_eq!(result.instant.hour(), 17);
    }

    #[test]
    fn anchored_is_case_preserving_but_insensitive() {
        let result = natural().try_match("Tomorrow at 5pm", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 17);
        assert_eq!(result.matched_text, "Tomorrow at 5pm");
    }

    #[test]
    fn yesterday_defaults_to_midnight() {
        let result = natural().try_match("yesterday", &reference()).unwrap();
        assert_eq!(result.instant.to_rfc3339(), "2022-12-31T00:00:00+00:00");
    }

    #[test]
    fn today_with_named_time() {
        let result = natural().try_match("today at noon", &reference()).unwrap();
        assert_eq!(result.instant.hour(), 12);
    }

    #[test]
    fn tomorrow_morning() {
        let result = natural().try_match("tomorrow morning", &reference()).unwrap();
        assert_eq!(result.instant.date_naive().day(), 2);
        assert_eq!(result.instant.hour(), 9);
    }

    #[test]
    fn anchored_respects_reference_zone() {
        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
        let reference = tokyo.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let result = natural().try_match("tomorrow at 9am", &reference).unwrap();
        // Jan 2, 09:00 JST = Jan 2, 00:00 UTC
        assert_eq!(result.instant.to_rfc3339(), "2023-01-02T00:00:00+00:00");
    }

    // ── Relative expressions ────────────────────────────────────────────

    #[test]
    fn in_two_hours_is_reference_exact() {
        let result = natural().try_match("in 2 hours", &reference()).unwrap();
        assert_eq!(
            result.instant,
            reference().with_timezone(&Utc) + chrono::Duration::hours(2)
        );
    }

    #[test]
    fn thirty_mins_ago_is_reference_exact() {
        let result = natural().try_match("30 mins ago", &reference()).unwrap();
        assert_eq!(
            result.instant,
            reference().with_timezone(&Utc) - chrono::Duration::minutes(30)
        );
    }

    // ── Engine fallback ─────────────────────────────────────────────────

    #[test]
    fn dialect_controls_numeric_date_order() {
        let us = NaturalLanguage::new(DateGrammar::EnUs)
            .try_match("01/02/2023", &reference())
            .unwrap();
        assert_eq!(us.instant.month(), 1);
        assert_eq!(us.instant.day(), 2);

        let gb = NaturalLanguage::new(DateGrammar::EnGb)
            .try_match("01/02/2023", &reference())
            .unwrap();
        assert_eq!(gb.instant.month(), 2);
        assert_eq!(gb.instant.day(), 1);
    }

    #[test]
    fn iso_8601_keeps_uppercase_designators() {
        // The engine treats `T` and `Z` case-sensitively, so the text must
        // reach it unlowered.
        let result = natural()
            .try_match("2023-05-20T10:30:00Z", &reference())
            .unwrap();
        assert_eq!(result.instant.to_rfc3339(), "2023-05-20T10:30:00+00:00");
    }

    #[test]
    fn capitalized_relative_prefix() {
        let result = natural().try_match("In 2 hours", &reference()).unwrap();
        assert_eq!(
            result.instant,
            reference().with_timezone(&Utc) + chrono::Duration::hours(2)
        );
    }

    #[test]
    fn unrecognized_text_is_no_match() {
        assert!(natural().try_match("gobbledygook", &reference()).is_none());
        assert!(natural().try_match("", &reference()).is_none());
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    #[test]
    fn time_of_day_forms() {
        assert_eq!(parse_time_of_day("5pm"), NaiveTime::from_hms_opt(17, 0, 0));
        assert_eq!(
            parse_time_of_day("2:30pm"),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("12am"),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
        assert_eq!(
            parse_time_of_day("14:00"),
            NaiveTime::from_hms_opt(14, 0, 0)
        );
        assert_eq!(parse_time_of_day("25pm"), None);
    }

    #[test]
    fn numeric_offset_forms() {
        assert_eq!(numeric_offset_minutes("+02:00"), Some(120));
        assert_eq!(numeric_offset_minutes("-0530"), Some(-330));
        assert_eq!(numeric_offset_minutes("UTC+5"), Some(300));
        assert_eq!(numeric_offset_minutes("GMT-3"), Some(-180));
        assert_eq!(numeric_offset_minutes("+15"), None);
        assert_eq!(numeric_offset_minutes("5pm"), None);
    }
}
