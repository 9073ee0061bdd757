/// Quantity used when the field is missing, empty or not a number.
pub const DEFAULT_QUANTITY: i128 = 1;

/// Parses the quantity field the way the storefront always has: the leading
/// integer of the text counts, anything after it is ignored.
///
/// Zero, negative and oversized values are returned as is; the cart API
/// validates them. Magnitudes beyond `i128` saturate.
pub fn parse_quantity(value: Option<&str>) -> i128 {
    value
        .filter(|value| !value.is_empty())
        .and_then(leading_integer)
        .unwrap_or(DEFAULT_QUANTITY)
}

fn leading_integer(text: &str) -> Option<i128> {
    let text = text.trim_start();
    let (negative, unsigned) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    };

    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    let digits = unsigned.get(..digits_len).filter(|digits| !digits.is_empty())?;

    let mut value: i128 = 0;
    for digit in digits.bytes().map(|b| i128::from(b - b'0')) {
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_input_defaults_to_one() {
        for value in [None, Some(""), Some(" "), Some("abc"), Some("-"), Some("+x"), Some(".5")] {
            assert_eq!(parse_quantity(value), 1, "input {value:?}");
        }
    }

    #[test]
    fn leading_integer_is_used() {
        assert_eq!(parse_quantity(Some("2")), 2);
        assert_eq!(parse_quantity(Some("  12 ")), 12);
        assert_eq!(parse_quantity(Some("3abc")), 3);
        assert_eq!(parse_quantity(Some("1.9")), 1);
        assert_eq!(parse_quantity(Some("+4")), 4);
    }

    #[test]
    fn non_positive_values_pass_through() {
        assert_eq!(parse_quantity(Some("0")), 0);
        assert_eq!(parse_quantity(Some("-3")), -3);
    }

    #[test]
    fn large_values_keep_their_magnitude() {
        assert_eq!(
            parse_quantity(Some("99999999999999999999")),
            99_999_999_999_999_999_999
        );
        assert_eq!(
            parse_quantity(Some("-99999999999999999999")),
            -99_999_999_999_999_999_999
        );
        let huge = "9".repeat(60);
        assert_eq!(parse_quantity(Some(huge.as_str())), i128::MAX);
        assert_eq!(parse_quantity(Some(format!("-{huge}").as_str())), i128::MIN);
    }
}
