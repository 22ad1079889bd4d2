//! The date-text interpretation pipeline.
//!
//! Normalizes the raw text, then evaluates an ordered list of strategies to
//! first success: military time, Unix epoch, then the locale-selected
//! natural-language grammar. Unrecognized text is a plain `None` — the
//! pipeline never errors.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::grammar::NaturalLanguage;
use crate::locale::{resolve_grammar, DateGrammar};
use crate::matchers::{DateMatcher, EpochTimestamp, MilitaryTime};
use crate::normalize::normalize_text;

/// A successful interpretation of selected text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// The absolute instant the text resolves to.
    pub instant: DateTime<Utc>,
    /// The normalized text that produced the match.
    pub matched_text: String,
    /// Start of the matched span within the normalized text, in bytes.
    pub span_start: usize,
    /// End of the matched span within the normalized text, in bytes.
    pub span_end: usize,
    /// The explicit UTC offset extracted from the text, when it carried a
    /// zone abbreviation or numeric offset ("5pm EST"). Absent for military
    /// times, epochs, and zone-less expressions ("tomorrow at 5pm").
    pub source_offset_minutes: Option<i32>,
}

/// Parse selected text against the grammar for an environment-reported
/// language tag.
///
/// The grammar selection is re-derived on every call — the reported language
/// may change between parses. The reference moment supplies both the "now"
/// anchor for relative expressions and the local zone for wall-clock-only
/// matches like military time.
pub fn parse_date_text(
    text: &str,
    reference: DateTime<Tz>,
    language_tag: Option<&str>,
) -> Option<ParseResult> {
    parse_with_grammar(text, reference, resolve_grammar(language_tag))
}

/// Parse selected text with an explicitly chosen grammar.
pub fn parse_with_grammar(
    text: &str,
    reference: DateTime<Tz>,
    grammar: DateGrammar,
) -> Option<ParseResult> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return None;
    }

    let military = MilitaryTime;
    let epoch = EpochTimestamp;
    let natural = NaturalLanguage::new(grammar);
    let strategies: [&dyn DateMatcher; 3] = [&military, &epoch, &natural];

    strategies
        .iter()
        .find_map(|strategy| strategy.try_match(&normalized, &reference))
}
