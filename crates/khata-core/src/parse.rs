//! # Forgiving Numeric Parsing
//!
//! Text from the entry form is re-parsed on every keystroke, so half-typed
//! input like `"3."`, `""` or `"12abc"` must never be an error. These helpers
//! read the leading decimal number of a string the same way a browser's
//! `parseFloat` does, but produce scaled integers instead of floats.
//!
//! ```text
//! "  12.345kg"  ──► sign: +, digits: 12.345, rest ignored
//!                    scale 2 ──► 1235 (half away from zero)
//! ".5"          ──► 50
//! "abc" / ""    ──► None
//! ```

/// Parses the leading decimal number of `text`, scaled by `10^scale`.
///
/// Fraction digits beyond `scale` are rounded half away from zero.
/// Returns `None` when no digit is found or the value overflows `i64`.
///
/// ## Example
/// ```rust
/// use khata_core::parse::parse_scaled;
///
/// assert_eq!(parse_scaled("100", 2), Some(10000));
/// assert_eq!(parse_scaled(" 2.345 pcs", 2), Some(235));
/// assert_eq!(parse_scaled("-1.5", 2), Some(-150));
/// assert_eq!(parse_scaled("", 2), None);
/// ```
pub fn parse_scaled(text: &str, scale: u32) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i128 = 0;
    let mut digits_seen = false;
    let mut in_fraction = false;
    let mut fraction_digits = 0u32;
    let mut round_up = false;

    for c in rest.chars() {
        if c == '.' && !in_fraction {
            in_fraction = true;
            continue;
        }
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        digits_seen = true;

        if !in_fraction {
            value = value * 10 + digit as i128;
            if value > i64::MAX as i128 {
                return None;
            }
        } else if fraction_digits < scale {
            value = value * 10 + digit as i128;
            fraction_digits += 1;
        } else if fraction_digits == scale {
            // First dropped digit decides the rounding
            round_up = digit >= 5;
            fraction_digits += 1;
        }
    }

    if !digits_seen {
        return None;
    }

    value *= 10i128.pow(scale - fraction_digits.min(scale));
    if round_up {
        value += 1;
    }
    if negative {
        value = -value;
    }

    i64::try_from(value).ok()
}

/// Divides with rounding half away from zero. `denominator` must be positive.
pub(crate) fn div_round(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0);
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_scaled("0", 2), Some(0));
        assert_eq!(parse_scaled("3", 2), Some(300));
        assert_eq!(parse_scaled("100.00", 2), Some(10000));
        assert_eq!(parse_scaled("+7.1", 2), Some(710));
    }

    #[test]
    fn test_parse_partial_input() {
        // Mid-keystroke states of the entry form
        assert_eq!(parse_scaled("3.", 2), Some(300));
        assert_eq!(parse_scaled(".5", 2), Some(50));
        assert_eq!(parse_scaled("12abc", 2), Some(1200));
        assert_eq!(parse_scaled("  4", 2), Some(400));
        assert_eq!(parse_scaled("1.2.3", 2), Some(120));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_scaled("", 2), None);
        assert_eq!(parse_scaled("   ", 2), None);
        assert_eq!(parse_scaled("abc", 2), None);
        assert_eq!(parse_scaled("-", 2), None);
        assert_eq!(parse_scaled(".", 2), None);
    }

    #[test]
    fn test_parse_rounds_extra_fraction_digits() {
        assert_eq!(parse_scaled("0.125", 2), Some(13));
        assert_eq!(parse_scaled("0.124", 2), Some(12));
        assert_eq!(parse_scaled("-0.125", 2), Some(-13));
        assert_eq!(parse_scaled("9.999", 2), Some(1000));
    }

    #[test]
    fn test_parse_overflow_is_none() {
        assert_eq!(parse_scaled("99999999999999999999999", 2), None);
    }

    #[test]
    fn test_div_round() {
        assert_eq!(div_round(5, 10), 1);
        assert_eq!(div_round(4, 10), 0);
        assert_eq!(div_round(-5, 10), -1);
        assert_eq!(div_round(2, 3), 1);
        assert_eq!(div_round(1, 3), 0);
    }
}
