//! Exact signed subtraction of binary magnitude strings.
//!
//! Operands are handled as digit strings, so there is no width limit.

use crate::types::{is_binary_digit, NEGATIVE_SIGN};
use std::cmp::Ordering;

/// Computes `a - b` for two unsigned binary strings.
///
/// An empty operand counts as zero and characters other than `0`/`1` are ignored.
/// Returns `"0"` for a zero difference, otherwise the binary magnitude without leading
/// zeros, prefixed with `-` when negative.
pub fn subtract_signed(a: &str, b: &str) -> String {
    let a = magnitude(a);
    let b = magnitude(b);

    match compare(&a, &b) {
        Ordering::Equal => "0".to_string(),
        Ordering::Greater => difference(&a, &b),
        Ordering::Less => format!("{}{}", NEGATIVE_SIGN, difference(&b, &a)),
    }
}

/// Binary digits of `operand` with leading zeros removed. Zero becomes the empty string.
fn magnitude(operand: &str) -> Vec<u8> {
    operand
        .chars()
        .filter(|&c| is_binary_digit(c))
        .skip_while(|&c| c == '0')
        .map(|c| if c == '1' { 1 } else { 0 })
        .collect()
}

fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// `larger - smaller`, both normalized magnitudes with `larger > smaller`.
fn difference(larger: &[u8], smaller: &[u8]) -> String {
    let mut digits = Vec::with_capacity(larger.len());
    let mut borrow = 0;

    for (i, &bit) in larger.iter().rev().enumerate() {
        let sub = smaller
            .len()
            .checked_sub(i + 1)
            .map_or(0, |index| smaller[index]);

        let mut value = bit as i8 - sub as i8 - borrow;
        borrow = 0;
        if value < 0 {
            value += 2;
            borrow = 1;
        }
        digits.push(if value == 1 { '1' } else { '0' });
    }

    let result: String = digits.into_iter().rev().collect();
    result.trim_start_matches('0').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_positive_difference() {
        assert_eq!(subtract_signed("101", "011"), "10");
        assert_eq!(subtract_signed("1000", "1"), "111");
    }

    #[test]
    fn test_negative_difference() {
        assert_eq!(subtract_signed("011", "101"), "-10");
        assert_eq!(subtract_signed("", "1"), "-1");
    }

    #[test]
    fn test_zero_difference() {
        assert_eq!(subtract_signed("101", "101"), "0");
        assert_eq!(subtract_signed("0101", "101"), "0");
        assert_eq!(subtract_signed("", ""), "0");
        assert_eq!(subtract_signed("000", ""), "0");
    }

    #[test]
    fn test_empty_subtrahend() {
        assert_eq!(subtract_signed("101", ""), "101");
        assert_eq!(subtract_signed("00101", ""), "101");
    }

    #[test]
    fn test_non_binary_characters_ignored() {
        assert_eq!(subtract_signed("1x0 1", "#11"), "10");
    }

    #[test]
    fn test_wide_operands() {
        let a = format!("1{}", "0".repeat(200));
        let b = "1";
        assert_eq!(subtract_signed(&a, b), "1".repeat(200));
        assert_eq!(subtract_signed(b, &a), format!("-{}", "1".repeat(200)));
    }

    proptest! {
        #[test]
        fn matches_integer_arithmetic(a in 0u64..(1 << 40), b in 0u64..(1 << 40)) {
            let expected = match a as i64 - b as i64 {
                0 => "0".to_string(),
                d if d < 0 => format!("-{:b}", -d),
                d => format!("{:b}", d),
            };
            prop_assert_eq!(subtract_signed(&format!("{:b}", a), &format!("{:b}", b)), expected);
        }

        #[test]
        fn is_deterministic(a in "[01]{0,48}", b in "[01]{0,48}") {
            prop_assert_eq!(subtract_signed(&a, &b), subtract_signed(&a, &b));
        }

        #[test]
        fn has_no_leading_zero(a in "[01]{0,48}", b in "[01]{0,48}") {
            let result = subtract_signed(&a, &b);
            let digits = result.trim_start_matches(NEGATIVE_SIGN);
            prop_assert!(result == "0" || digits.starts_with('1'));
        }
    }
}
