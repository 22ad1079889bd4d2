//! Text normalization applied before any matching.

/// Normalize raw selected text for matching.
///
/// Collapses every whitespace run (spaces, tabs, newlines) into a single
/// space, trims the ends, and strips a trailing run of `. , ; ! ?` — except
/// that a single trailing dot is preserved when the text, case-insensitively,
/// ends in the abbreviations `a.m.` / `p.m.`, so that "5 p.m." survives
/// intact.
pub fn normalize_text(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut prev_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                collapsed.push(' ');
            }
            prev_space = true;
        } else {
            collapsed.push(ch);
            prev_space = false;
        }
    }

    let mut clean = collapsed.trim().to_string();

    let trailing = clean
        .chars()
        .rev()
        .take_while(|c| matches!(c, '.' | ',' | ';' | '!' | '?'))
        .count();
    if trailing > 0 {
        let keep_abbreviation_dot = trailing == 1 && clean.ends_with('.') && {
            let lowered = clean.to_lowercase();
            lowered.ends_with("a.m.") || lowered.ends_with("p.m.")
        };
        if !keep_abbreviation_dot {
            // Trailing punctuation is always single-byte ASCII.
            clean.truncate(clean.len() - trailing);
        }
    }

    clean.trim_end().to_string()
}
