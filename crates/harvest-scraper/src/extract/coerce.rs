//! Text-to-number coercion for scraped field values.

/// Strips every non-digit character and parses what remains.
///
/// Handles thousands separators and unit suffixes: `"12,345원"` becomes
/// `12345`. Full-width digits (`"１２"`) count as digits. Returns `None`
/// when no digits remain or the value overflows.
#[must_use]
pub fn digits_to_int(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter_map(ascii_digit).collect();
    digits.parse().ok()
}

/// Folds ASCII and full-width decimal digits to their ASCII form.
fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{ff10}'..='\u{ff19}' => char::from_u32(u32::from(c) - 0xff10 + u32::from('0')),
        _ => None,
    }
}

/// Parses trimmed text as a plain integer.
#[must_use]
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parses trimmed text as a finite float.
#[must_use]
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_to_int_strips_separators_and_currency() {
        assert_eq!(digits_to_int("12,345원"), Some(12345));
        assert_eq!(digits_to_int("판매지수 3,051"), Some(3051));
        assert_eq!(digits_to_int("(128)"), Some(128));
    }

    #[test]
    fn digits_to_int_accepts_full_width_digits() {
        assert_eq!(digits_to_int("１２,３４５원"), Some(12345));
        assert_eq!(digits_to_int("판매지수 ３0５1"), Some(3051));
    }

    #[test]
    fn digits_to_int_ignores_other_numeric_symbols() {
        assert_eq!(digits_to_int("½권"), None);
        assert_eq!(digits_to_int("Ⅻ 3"), Some(3));
    }

    #[test]
    fn digits_to_int_without_digits_is_none() {
        assert_eq!(digits_to_int("품절"), None);
        assert_eq!(digits_to_int(""), None);
    }

    #[test]
    fn digits_to_int_overflow_is_none() {
        assert_eq!(digits_to_int("99999999999999999999999"), None);
    }

    #[test]
    fn parse_int_trims_whitespace() {
        assert_eq!(parse_int(" 10 "), Some(10));
        assert_eq!(parse_int("10%"), None);
    }

    #[test]
    fn parse_float_reads_rating() {
        assert_eq!(parse_float("4.5"), Some(4.5));
        assert_eq!(parse_float(" 10.0 "), Some(10.0));
    }

    #[test]
    fn parse_float_rejects_non_numeric_and_non_finite() {
        assert_eq!(parse_float("평점없음"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("inf"), None);
    }
}
