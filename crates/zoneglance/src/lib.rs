//! # zoneglance
//!
//! Extracts a date/time expression from arbitrary selected text and converts
//! it to a target timezone for display.
//!
//! Parsing runs several disjoint strategies in a fixed priority order: strict
//! military-time and Unix-epoch matchers first, then a locale-selected
//! natural-language grammar. The converted result carries a validity flag and
//! can be labeled with the day rollover relative to the source's calendar
//! date.
//!
//! All functions take explicit inputs (no system clock access) — the caller
//! provides the reference moment for "now"-relative parses, keeping the core
//! pure and testable. The only ambient reads are [`timezone::system_timezone`]
//! and its `auto` resolution in [`timezone::resolve_target_zone`], which
//! callers invoke explicitly.
//!
//! # Modules
//!
//! - [`normalize`] — whitespace and trailing-punctuation cleanup of raw text
//! - [`matchers`] — strict-format recognizers (military time, Unix epoch)
//! - [`locale`] — language tag → date grammar selection
//! - [`grammar`] — locale-aware natural-language date matching
//! - [`parser`] — the priority-ordered interpretation pipeline
//! - [`timezone`] — zone conversion and zone-name normalization
//! - [`rollover`] — cross-zone calendar-day shift labeling
//! - [`error`] — error types

pub mod error;
pub mod grammar;
pub mod locale;
pub mod matchers;
pub mod normalize;
pub mod parser;
pub mod rollover;
pub mod timezone;

pub use error::GlanceError;
pub use grammar::NaturalLanguage;
pub use locale::{resolve_grammar, DateGrammar};
pub use matchers::{DateMatcher, EpochTimestamp, MilitaryTime};
pub use normalize::normalize_text;
pub use parser::{parse_date_text, parse_with_grammar, ParseResult};
pub use rollover::{day_rollover, diff_label, DayRollover};
pub use timezone::{
    convert, normalize_timezone, parse_rfc3339, resolve_target_zone, resolve_zone,
    system_timezone, ConvertedMoment,
};
