//! Timezone conversion and zone-name normalization.
//!
//! Conversion is a pure function of its inputs; an unrecognized zone yields a
//! [`ConvertedMoment`] flagged invalid rather than an error, so callers
//! branch on validity instead of catching failures. The only ambient read in
//! this module is [`system_timezone`], which reflects the environment at call
//! time.

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{GlanceError, Result};

/// The runtime's current default IANA zone name, read live on every call.
pub fn system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Parse an IANA timezone name.
pub fn resolve_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| GlanceError::InvalidTimezone(name.to_string()))
}

/// Parse an RFC 3339 datetime string into an instant.
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GlanceError::InvalidDatetime(format!("'{s}': {e}")))
}

/// An instant projected into a named target zone.
///
/// Invalid when the zone name was unrecognized; calendar accessors return
/// `None` in that case, so validity is always checked before reading fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedMoment {
    zone: String,
    local: Option<DateTime<Tz>>,
}

impl ConvertedMoment {
    pub fn is_valid(&self) -> bool {
        self.local.is_some()
    }

    /// The zone name this conversion targeted, as given.
    pub fn zone_name(&self) -> &str {
        &self.zone
    }

    pub fn local(&self) -> Option<&DateTime<Tz>> {
        self.local.as_ref()
    }

    pub fn date_naive(&self) -> Option<NaiveDate> {
        self.local.as_ref().map(|dt| dt.date_naive())
    }

    pub fn year(&self) -> Option<i32> {
        self.local.as_ref().map(|dt| dt.year())
    }

    pub fn month(&self) -> Option<u32> {
        self.local.as_ref().map(|dt| dt.month())
    }

    pub fn day(&self) -> Option<u32> {
        self.local.as_ref().map(|dt| dt.day())
    }

    pub fn hour(&self) -> Option<u32> {
        self.local.as_ref().map(|dt| dt.hour())
    }

    pub fn minute(&self) -> Option<u32> {
        self.local.as_ref().map(|dt| dt.minute())
    }

    /// The wall-clock time, "5:04 PM" style, or 24-hour "17:04" when asked.
    pub fn format_time(&self, format24h: bool) -> Option<String> {
        let local = self.local.as_ref()?;
        let formatted = if format24h {
            local.format("%H:%M").to_string()
        } else {
            local.format("%-I:%M %p").to_string()
        };
        Some(formatted)
    }

    /// Zone label for display: abbreviation plus offset, e.g. "JST (+09:00)".
    pub fn zone_label(&self) -> Option<String> {
        let local = self.local.as_ref()?;
        Some(format!("{} ({})", local.format("%Z"), utc_offset_label(local)))
    }
}

/// Project an instant into a named zone.
///
/// Pure in both inputs; an unknown zone name produces an invalid moment.
pub fn convert(instant: DateTime<Utc>, zone_name: &str) -> ConvertedMoment {
    ConvertedMoment {
        zone: zone_name.to_string(),
        local: resolve_zone(zone_name)
            .ok()
            .map(|tz| instant.with_timezone(&tz)),
    }
}

/// Resolve a configured target zone to a concrete name.
///
/// `"auto"` (or empty input) means the runtime's current default zone,
/// resolved at call time; anything else is normalized through
/// [`normalize_timezone`].
pub fn resolve_target_zone(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return system_timezone();
    }
    normalize_timezone(trimmed)
}

/// Rewrite deprecated aliases and fixed-offset abbreviations to canonical
/// IANA identifiers.
///
/// Lookup is case-insensitive and whitespace-trimmed; unmapped input passes
/// through unchanged (case preserved), so the function is idempotent.
pub fn normalize_timezone(raw: &str) -> String {
    let trimmed = raw.trim();
    match canonical_zone(trimmed) {
        Some(canonical) => canonical.to_string(),
        None => trimmed.to_string(),
    }
}

/// Canonical zone for a deprecated alias or abbreviation.
///
/// Ambiguous abbreviations map to one fixed canonical zone each ("CST" is US
/// Central, "IST" is India, "CET" is Paris) — no disambiguation from context.
fn canonical_zone(name: &str) -> Option<&'static str> {
    let canonical = match name.to_ascii_lowercase().as_str() {
        "us/eastern" | "est" | "edt" => "America/New_York",
        "us/central" | "cst" | "cdt" => "America/Chicago",
        "us/mountain" | "mst" | "mdt" => "America/Denver",
        "us/pacific" | "pst" | "pdt" => "America/Los_Angeles",
        "us/alaska" | "akst" | "akdt" => "America/Anchorage",
        "us/hawaii" | "hst" => "Pacific/Honolulu",
        "us/arizona" => "America/Phoenix",
        "canada/eastern" => "America/Toronto",
        "canada/pacific" => "America/Vancouver",
        "mexico/general" => "America/Mexico_City",
        "brazil/east" | "brt" => "America/Sao_Paulo",
        "gmt" | "greenwich" | "universal" | "zulu" => "UTC",
        "gb" | "gb-eire" | "bst" => "Europe/London",
        "eire" => "Europe/Dublin",
        "cet" | "cest" => "Europe/Paris",
        "wet" => "Europe/Lisbon",
        "eet" | "eest" => "Europe/Athens",
        "msk" | "w-su" => "Europe/Moscow",
        "europe/kiev" => "Europe/Kyiv",
        "asia/calcutta" | "ist" => "Asia/Kolkata",
        "asia/saigon" | "ict" => "Asia/Ho_Chi_Minh",
        "asia/rangoon" => "Asia/Yangon",
        "asia/katmandu" => "Asia/Kathmandu",
        "hkt" | "hongkong" => "Asia/Hong_Kong",
        "sgt" | "singapore" => "Asia/Singapore",
        "jst" | "japan" => "Asia/Tokyo",
        "kst" | "rok" => "Asia/Seoul",
        "prc" => "Asia/Shanghai",
        "aest" | "aedt" | "australia/act" | "australia/nsw" => "Australia/Sydney",
        "awst" | "australia/west" => "Australia/Perth",
        "acst" | "australia/north" => "Australia/Darwin",
        "nzst" | "nzdt" | "nz" => "Pacific/Auckland",
        _ => return None,
    };
    Some(canonical)
}

/// Format a UTC offset as "+09:00" / "-05:00".
fn utc_offset_label<T: TimeZone>(dt: &DateTime<T>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}
