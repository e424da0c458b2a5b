/*!
 * Act and scene label ranking.
 *
 * Labels arrive as whatever the document author wrote: integers, digit
 * strings, Roman numerals in either case, or garbage. They are mapped to a
 * numeric rank where possible and to `Rank::Unorderable` otherwise, which
 * sorts after every numeric rank.
 */

use serde_json::Value;
use std::cmp::Ordering;

use crate::scene::SceneRecord;

/// Sort rank of an act or scene label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rank {
    /// Label with a numeric value
    Ordered(f64),
    /// Missing or unparseable label; sorts last
    Unorderable,
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Finite values only, so partial_cmp always succeeds
            (Rank::Ordered(a), Rank::Ordered(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Rank::Ordered(_), Rank::Unorderable) => Ordering::Less,
            (Rank::Unorderable, Rank::Ordered(_)) => Ordering::Greater,
            (Rank::Unorderable, Rank::Unorderable) => Ordering::Equal,
        }
    }
}

/// Value of a single Roman numeral digit
fn roman_digit(c: char) -> Option<i64> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Evaluate an upper-case Roman numeral.
///
/// Scans right to left; a digit smaller than the one to its right is
/// subtracted, anything else is added. Returns `None` if any character is
/// not a Roman digit.
pub fn roman_value(numeral: &str) -> Option<i64> {
    let digits = numeral.chars().map(roman_digit).collect::<Option<Vec<_>>>()?;
    if digits.is_empty() {
        return None;
    }

    let mut total = 0;
    let mut previous = 0;
    for &value in digits.iter().rev() {
        if value < previous {
            total -= value;
        } else {
            total += value;
        }
        previous = value;
    }

    Some(total)
}

/// Rank of a textual label
fn rank_text(label: &str) -> Rank {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Rank::Unorderable;
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<f64>()
            .map(Rank::Ordered)
            .unwrap_or(Rank::Unorderable);
    }

    match roman_value(&trimmed.to_uppercase()) {
        Some(value) => Rank::Ordered(value as f64),
        None => Rank::Unorderable,
    }
}

/// Rank an act or scene label.
///
/// Numbers keep their value as is, digit strings are read as base 10, and
/// Roman numerals are evaluated case-insensitively. Anything else,
/// including an absent label, is unorderable.
pub fn rank_label(label: Option<&Value>) -> Rank {
    match label {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(value) if value.is_finite() => Rank::Ordered(value),
            _ => Rank::Unorderable,
        },
        Some(Value::String(text)) => rank_text(text),
        _ => Rank::Unorderable,
    }
}

/// Canonical order of two scenes: by act rank, then by scene rank.
pub fn compare_scenes(a: &SceneRecord, b: &SceneRecord) -> Ordering {
    rank_label(a.act.as_ref())
        .cmp(&rank_label(b.act.as_ref()))
        .then_with(|| rank_label(a.scene.as_ref()).cmp(&rank_label(b.scene.as_ref())))
}

/// Sort scenes in place; equal ranks keep their input order.
pub fn sort_scenes(scenes: &mut [SceneRecord]) {
    scenes.sort_by(compare_scenes);
}
