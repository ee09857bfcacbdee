//! Strict `application/x-www-form-urlencoded` unescaping.
//!
//! Unlike lenient decoders, a `%` not followed by two hex digits is an error
//! rather than a literal.

use crate::error::DecodeError;

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Unescape one key or value. `offset` is the position of `raw` inside the
/// whole payload, used for error reporting.
pub(crate) fn percent_decode(raw: &[u8], offset: usize) -> Result<String, DecodeError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut rest = raw;
    let mut pos = offset;

    while let Some((&b, tail)) = rest.split_first() {
        match b {
            b'%' => {
                let [hi, lo, after @ ..] = tail else {
                    return Err(DecodeError::InvalidEscape { offset: pos });
                };
                let (Some(hi), Some(lo)) = (hex_val(*hi), hex_val(*lo)) else {
                    return Err(DecodeError::InvalidEscape { offset: pos });
                };
                out.push((hi << 4) | lo);
                rest = after;
                pos += 3;
            }
            b'+' => {
                out.push(b' ');
                rest = tail;
                pos += 1;
            }
            _ => {
                out.push(b);
                rest = tail;
                pos += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn plain_and_plus() {
        assert_eq!(percent_decode(b"a+b%20c", 0).unwrap(), "a b c");
    }

    #[test]
    fn escaped_reserved_chars() {
        assert_eq!(percent_decode(b"%26%3D%2B%5B", 0).unwrap(), "&=+[");
    }

    #[test]
    fn multibyte_utf8() {
        assert_eq!(percent_decode(b"caf%C3%A9", 0).unwrap(), "café");
    }

    #[test]
    fn bad_hex_reports_offset() {
        assert_eq!(
            percent_decode(b"ab%ZZ", 5),
            Err(DecodeError::InvalidEscape { offset: 7 })
        );
    }

    #[test]
    fn truncated_escape() {
        assert_eq!(
            percent_decode(b"abc%4", 0),
            Err(DecodeError::InvalidEscape { offset: 3 })
        );
        assert_eq!(
            percent_decode(b"%", 0),
            Err(DecodeError::InvalidEscape { offset: 0 })
        );
    }

    #[test]
    fn invalid_utf8_after_unescape() {
        assert_eq!(percent_decode(b"%FF%FE", 0), Err(DecodeError::InvalidUtf8));
    }
}
