//! Digit-sum reduction helpers shared by every calculator.

use std::fmt::Display;

const MASTER_NUMBERS: [u32; 2] = [11, 22];

/// Sums the decimal digit characters of `value`'s text form.
///
/// Non-digit characters count as 0, so this never fails.
pub fn sum_digits(value: impl Display) -> u32 {
    value
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .sum()
}

/// Repeatedly sums digits until the value is at most 9.
pub fn reduce_to_single_digit(value: u32) -> u32 {
    let mut current = value;
    while current > 9 {
        current = sum_digits(current);
    }
    current
}

/// Like [`reduce_to_single_digit`], but stops on the master numbers 11 and 22.
pub fn reduce_to_single_digit_or_master(value: u32) -> u32 {
    let mut current = value;
    while current > 9 && !MASTER_NUMBERS.contains(&current) {
        current = sum_digits(current);
    }
    current
}

/// Parses the leading integer of `value` and reduces it; 0 when nothing parses.
pub fn reduce_text_to_single_digit(value: &str) -> u32 {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    // too long for u32: the digit sum of the text is the same first step
    match digits.parse::<u32>() {
        Ok(number) => reduce_to_single_digit(number),
        Err(_) => reduce_to_single_digit(sum_digits(&digits)),
    }
}

pub fn is_master_number(value: u32) -> bool {
    MASTER_NUMBERS.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_digits() {
        assert_eq!(sum_digits(1990), 19);
        assert_eq!(sum_digits("28-10-1990"), 30);
        assert_eq!(sum_digits("abc"), 0);
        assert_eq!(sum_digits(0), 0);
    }

    #[test]
    fn test_reduce_to_single_digit() {
        assert_eq!(reduce_to_single_digit(2028), 3);
        assert_eq!(reduce_to_single_digit(28), 1);
        assert_eq!(reduce_to_single_digit(9), 9);
        assert_eq!(reduce_to_single_digit(0), 0);
        assert_eq!(reduce_to_single_digit(99_999), 9);
    }

    #[test]
    fn test_reduce_stays_in_range_and_is_idempotent() {
        for n in 0..5_000u32 {
            let reduced = reduce_to_single_digit(n);
            assert!(reduced <= 9);
            assert_eq!(reduce_to_single_digit(reduced), reduced);
        }
    }

    #[test]
    fn test_reduce_preserves_master_numbers() {
        assert_eq!(reduce_to_single_digit_or_master(11), 11);
        assert_eq!(reduce_to_single_digit_or_master(22), 22);
        assert_eq!(reduce_to_single_digit_or_master(29), 11);
        assert_eq!(reduce_to_single_digit_or_master(38), 11);
        assert_eq!(reduce_to_single_digit_or_master(13), 4);
        assert_eq!(reduce_to_single_digit(29), 2);
    }

    #[test]
    fn test_master_reduction_range() {
        for n in 1..5_000u32 {
            let reduced = reduce_to_single_digit_or_master(n);
            assert!((1..=9).contains(&reduced) || is_master_number(reduced), "{} -> {}", n, reduced);
        }
    }

    #[test]
    fn test_reduce_text() {
        assert_eq!(reduce_text_to_single_digit("2028"), 3);
        assert_eq!(reduce_text_to_single_digit("12abc"), 3);
        assert_eq!(reduce_text_to_single_digit("abc"), 0);
        assert_eq!(reduce_text_to_single_digit(""), 0);
        assert_eq!(reduce_text_to_single_digit("99999999999999"), 9);
    }
}
