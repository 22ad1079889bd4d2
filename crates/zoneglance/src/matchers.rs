//! Strict-format recognizers applied before the natural-language grammar.
//!
//! Each strategy implements [`DateMatcher`] and is evaluated against the full
//! normalized text — a match must consume the entire string, so mixed text
//! like "call at 1400 tomorrow" falls through to the general grammar.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::parser::ParseResult;

/// A single parse strategy, tried in priority order until the first success.
///
/// The reference moment carries both the "now" anchor and the local zone, so
/// implementations never read the system clock.
pub trait DateMatcher {
    fn try_match(&self, text: &str, reference: &DateTime<Tz>) -> Option<ParseResult>;
}

/// `HHMM` military time (e.g. "1400", "2359").
static MILITARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3])([0-5]\d)$").expect("valid military pattern"));

/// Colon-separated clock time (e.g. "14:00", "23:59:00").
static MILITARY_COLON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)(?::([0-5]\d))?$").expect("valid clock pattern")
});

/// Unix epoch timestamps: exactly 10 digits (seconds) or 13 (milliseconds).
static EPOCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{10}|\d{13})$").expect("valid epoch pattern"));

/// Matches bare military/clock times and resolves them on the reference date
/// in the reference zone.
pub struct MilitaryTime;

impl DateMatcher for MilitaryTime {
    fn try_match(&self, text: &str, reference: &DateTime<Tz>) -> Option<ParseResult> {
        let caps = MILITARY_RE
            .captures(text)
            .or_else(|| MILITARY_COLON_RE.captures(text))?;

        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let second: u32 = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };

        let naive = reference.date_naive().and_hms_opt(hour, minute, second)?;
        // A spring-forward gap makes the wall time nonexistent; ambiguity
        // resolves to the earlier offset.
        let local = reference.timezone().from_local_datetime(&naive).earliest()?;

        Some(ParseResult {
            instant: local.with_timezone(&Utc),
            matched_text: text.to_string(),
            span_start: 0,
            span_end: text.len(),
            source_offset_minutes: None,
        })
    }
}

/// Matches 10/13-digit Unix timestamps, rejecting values whose calendar year
/// falls outside 1970–2100 (guards against phone numbers and other numeric
/// strings).
pub struct EpochTimestamp;

impl DateMatcher for EpochTimestamp {
    fn try_match(&self, text: &str, _reference: &DateTime<Tz>) -> Option<ParseResult> {
        let caps = EPOCH_RE.captures(text)?;
        let digits = &caps[1];

        let instant = if digits.len() == 10 {
            DateTime::from_timestamp(digits.parse().ok()?, 0)?
        } else {
            DateTime::from_timestamp_millis(digits.parse().ok()?)?
        };

        if !(1970..=2100).contains(&instant.year()) {
            return None;
        }

        Some(ParseResult {
            instant,
            matched_text: text.to_string(),
            span_start: 0,
            span_end: text.len(),
            source_offset_minutes: None,
        })
    }
}
