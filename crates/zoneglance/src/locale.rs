//! Language tag → date grammar selection.
//!
//! The selection is a pure, stateless lookup re-run on every parse — the
//! environment-reported language can change between calls, so nothing is
//! cached.

use interim::Dialect;

/// The closed set of supported natural-language date grammars.
///
/// English splits on numeric date order: `EnGb` reads ambiguous `DD/MM` dates
/// day-first, `EnUs` month-first. The language-specific variants carry the
/// date-order bias conventional for that language; `Standard` is the fallback
/// for unrecognized tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGrammar {
    EnUs,
    EnGb,
    Japanese,
    German,
    French,
    Portuguese,
    Spanish,
    Dutch,
    Russian,
    Standard,
}

/// English locales that read ambiguous numeric dates day-first.
const DAY_FIRST_ENGLISH: [&str; 7] = [
    "en-GB", "en-AU", "en-NZ", "en-IE", "en-IN", "en-SG", "en-ZA",
];

/// Map an environment-reported language tag to a grammar.
///
/// `None` defaults to `en-US`. English tags are checked by prefix against the
/// day-first set; other languages match on their two-letter prefix.
pub fn resolve_grammar(tag: Option<&str>) -> DateGrammar {
    let tag = tag.unwrap_or("en-US");

    if tag.starts_with("en") {
        if DAY_FIRST_ENGLISH.iter().any(|l| tag.starts_with(l)) {
            return DateGrammar::EnGb;
        }
        return DateGrammar::EnUs;
    }

    match tag.get(..2) {
        Some("ja") => DateGrammar::Japanese,
        Some("de") => DateGrammar::German,
        Some("fr") => DateGrammar::French,
        Some("pt") => DateGrammar::Portuguese,
        Some("es") => DateGrammar::Spanish,
        Some("nl") => DateGrammar::Dutch,
        Some("ru") => DateGrammar::Russian,
        _ => DateGrammar::Standard,
    }
}

impl DateGrammar {
    /// The numeric date-order bias handed to the underlying grammar engine.
    ///
    /// Japanese short numeric dates are month-first (`MM/DD`); the continental
    /// European grammars and Russian are day-first.
    pub fn dialect(self) -> Dialect {
        match self {
            DateGrammar::EnUs | DateGrammar::Japanese | DateGrammar::Standard => Dialect::Us,
            DateGrammar::EnGb
            | DateGrammar::German
            | DateGrammar::French
            | DateGrammar::Portuguese
            | DateGrammar::Spanish
            | DateGrammar::Dutch
            | DateGrammar::Russian => Dialect::Uk,
        }
    }
}
