/*!
 * Tests for act and scene label ranking
 */

use serde_json::{Value, json};
use folio::ordering::{Rank, rank_label, roman_value};

/// Test the documented ranking examples
#[test]
fn test_rank_label_withDocumentedExamples_shouldMatch() {
    assert_eq!(rank_label(None), Rank::Unorderable);
    assert_eq!(rank_label(Some(&json!(""))), Rank::Unorderable);
    assert_eq!(rank_label(Some(&json!("7"))), Rank::Ordered(7.0));
    assert_eq!(rank_label(Some(&json!("IV"))), Rank::Ordered(4.0));
    assert_eq!(rank_label(Some(&json!("iv"))), Rank::Ordered(4.0));
    assert_eq!(rank_label(Some(&json!("not-a-number"))), Rank::Unorderable);
}

/// Test additive and subtractive Roman forms
#[test]
fn test_roman_value_withAdditiveAndSubtractiveForms_shouldEvaluate() {
    assert_eq!(roman_value("IIII"), Some(4));
    assert_eq!(roman_value("IV"), Some(4));
    assert_eq!(roman_value("MCMXCIX"), Some(1999));
    assert_eq!(roman_value("MMMCMXCIX"), Some(3999));
    assert_eq!(roman_value(""), None);
    assert_eq!(roman_value("IVA"), None);
}

/// Test that Roman numerals with surrounding whitespace still rank
#[test]
fn test_rank_label_withPaddedNumeral_shouldTrim() {
    assert_eq!(rank_label(Some(&Value::String("  xii ".to_string()))), Rank::Ordered(12.0));
}

/// Test that long digit strings do not overflow
#[test]
fn test_rank_label_withHugeDigitString_shouldStayOrdered() {
    let label = json!("123456789012345678901234567890");
    assert!(matches!(rank_label(Some(&label)), Rank::Ordered(_)));
}

/// Test that numeric ranks always precede unorderable ones
#[test]
fn test_rank_ordering_withUnorderable_shouldSortLast() {
    let mut ranks = vec![
        Rank::Unorderable,
        Rank::Ordered(3.0),
        Rank::Unorderable,
        Rank::Ordered(1.0),
    ];
    ranks.sort();
    assert_eq!(
        ranks,
        vec![Rank::Ordered(1.0), Rank::Ordered(3.0), Rank::Unorderable, Rank::Unorderable]
    );
}
