//! Reading values out of the page's cookie string.

/// Name of the cookie holding the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// A cookie value that cannot be percent-decoded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CookieError {
    /// A `%` is not followed by two hex digits.
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),
    /// The decoded bytes are not UTF-8.
    #[error("decoded cookie value is not valid UTF-8")]
    InvalidUtf8,
}

/// Looks up cookie `name` in a `document.cookie` style string.
///
/// The first matching entry wins; its value is percent-decoded.
pub fn get_cookie(cookies: &str, name: &str) -> Result<Option<String>, CookieError> {
    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return decode_component(value).map(Some);
        }
    }
    Ok(None)
}

/// Percent-decodes a URI component. `+` is left as is.
fn decode_component(encoded: &str) -> Result<String, CookieError> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut position = 0;
    while let Some(&byte) = bytes.get(position) {
        if byte != b'%' {
            decoded.push(byte);
            position += 1;
            continue;
        }

        let high = bytes.get(position + 1).and_then(|b| hex_value(*b));
        let low = bytes.get(position + 2).and_then(|b| hex_value(*b));
        match (high, low) {
            (Some(high), Some(low)) => decoded.push((high << 4) | low),
            _ => return Err(CookieError::MalformedEscape(position)),
        }
        position += 3;
    }

    String::from_utf8(decoded).map_err(|_| CookieError::InvalidUtf8)
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|value| value as u8)
}
