//! Title collation for play ordering
//!
//! Approximates ordinary locale collation without a locale database:
//! - Primary: base letters, accents and case ignored (NFD, marks dropped, lowercased),
//!   with whitespace before punctuation before digits before letters
//! - Secondary: accents
//! - Tertiary: case, lowercase first
//!
//! Within each character class code point order is used, so scripts and
//! punctuation marks are not reordered the way a tailored locale would.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Coarse collation weight of a character class
fn class_weight(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (class_weight(c), c))
        .collect()
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd().map(char::is_uppercase).collect()
}

/// Compare two titles the way a reader expects them listed.
///
/// ```
/// use std::cmp::Ordering;
/// use folio::collation::compare_titles;
///
/// assert_eq!(compare_titles("antony and Cleopatra", "Hamlet"), Ordering::Less);
/// assert_eq!(compare_titles("Émile", "Fred"), Ordering::Less);
/// ```
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}
