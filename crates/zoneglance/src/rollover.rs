//! Calendar-day rollover between the source expression and its conversion.
//!
//! The comparison is between calendar dates, not instants: the source wall
//! clock is reconstructed at its explicit UTC offset, the target side comes
//! from the converted moment, and the label reports how many calendar days
//! apart the two wall clocks are. DST transitions never skew the result
//! because no duration arithmetic on instants is involved.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

use crate::timezone::ConvertedMoment;

/// How the converted wall-clock date relates to the source's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRollover {
    Same,
    NextDay,
    PrevDay,
    Days(i64),
}

impl fmt::Display for DayRollover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayRollover::Same => Ok(()),
            DayRollover::NextDay => write!(f, "(Next Day)"),
            DayRollover::PrevDay => write!(f, "(Prev Day)"),
            DayRollover::Days(n) => write!(f, "({n:+} Days)"),
        }
    }
}

/// Compare the source expression's calendar date with the converted one.
///
/// Requires the explicit offset the source text carried ("5pm EST"); without
/// one there is no source wall clock to compare against and the answer is
/// `Same`. An invalid conversion is also `Same`.
pub fn day_rollover(
    source: DateTime<Utc>,
    converted: &ConvertedMoment,
    source_offset_minutes: Option<i32>,
) -> DayRollover {
    let offset_minutes = match source_offset_minutes {
        Some(m) => m,
        None => return DayRollover::Same,
    };
    let target_date = match converted.date_naive() {
        Some(d) => d,
        None => return DayRollover::Same,
    };
    let offset = match FixedOffset::east_opt(offset_minutes * 60) {
        Some(o) => o,
        None => return DayRollover::Same,
    };

    let source_date = source.with_timezone(&offset).date_naive();
    match (target_date - source_date).num_days() {
        0 => DayRollover::Same,
        1 => DayRollover::NextDay,
        -1 => DayRollover::PrevDay,
        n => DayRollover::Days(n),
    }
}

/// The display suffix for a conversion, e.g. `"(Next Day)"`. Empty for the
/// same day.
pub fn diff_label(
    source: DateTime<Utc>,
    converted: &ConvertedMoment,
    source_offset_minutes: Option<i32>,
) -> String {
    day_rollover(source, converted, source_offset_minutes).to_string()
}
