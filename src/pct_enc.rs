//! Percent-encoding utilities.
//!
//! Decoding rewrites `%HH` escapes in place, which is what lets a parsed
//! [`Url`](crate::Url) keep every component inside one backing buffer.
//! Encoding takes a [`ReservedSet`] naming the bytes that must be escaped;
//! `%` itself is always escaped regardless of the set.

use crate::error::{ParseError, ParseErrorKind};
use alloc::string::String;

/// A set of ASCII bytes that must be percent-encoded on output.
///
/// The default set used by the serializer is [`URL_RESERVED`]; callers
/// needing stricter encoding can widen it with [`or`](Self::or):
///
/// ```
/// use mail_url::pct_enc::{encode, ReservedSet, URL_RESERVED};
///
/// let wide = URL_RESERVED.or(ReservedSet::new(b"@ "));
/// assert_eq!(encode("a b@c", wide), "a%20b%40c");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ReservedSet(u64, u64);

impl ReservedSet {
    /// Creates a set containing exactly the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut set = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot reserve a non-ASCII byte");
            set |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(set as u64, (set >> 64) as u64)
    }

    /// Combines two sets into one.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Checks whether the set contains the given byte.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: u8) -> bool {
        let half = if x < 64 {
            self.0
        } else if x < 128 {
            self.1
        } else {
            return false;
        };
        half & 1u64.wrapping_shl(x as u32) != 0
    }
}

/// The bytes escaped when serializing a URL component: `/`, `:`, `&` and `%`.
pub const URL_RESERVED: ReservedSet = ReservedSet::new(b"/:&%");

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Decodes every `%HH` escape in `bytes` in place.
///
/// Returns the decoded length: the decoded text occupies `bytes[..len]`
/// and the remainder of the buffer is left unspecified. The output is
/// never longer than the input, which is what makes in-place rewriting
/// sound.
///
/// # Errors
///
/// Returns [`InvalidEscape`](ParseErrorKind::InvalidEscape) if a `%` is
/// followed by fewer than two bytes or by a non-hexadecimal digit. The
/// buffer contents are unspecified after a failure.
pub fn decode_in_place(bytes: &mut [u8]) -> Result<usize, ParseError> {
    let mut r = 0;
    let mut w = 0;
    while r < bytes.len() {
        let x = bytes[r];
        if x == b'%' {
            if r + 2 >= bytes.len() {
                return Err(ParseError::new(r, ParseErrorKind::InvalidEscape));
            }
            let hi = OCTET_TABLE_HI[bytes[r + 1] as usize];
            let lo = OCTET_TABLE_LO[bytes[r + 2] as usize];
            // 0xff never arises from a hex digit: hi <= 0xf0 and lo <= 0x0f
            if hi == 0xff || lo == 0xff {
                return Err(ParseError::new(r, ParseErrorKind::InvalidEscape));
            }
            bytes[w] = hi | lo;
            r += 3;
        } else {
            bytes[w] = x;
            r += 1;
        }
        w += 1;
    }
    Ok(w)
}

/// Percent-encodes `src`, escaping the bytes in `reserved`.
///
/// Escapes use upper-case hex digits. `%` is always escaped, whether or
/// not the set contains it. Bytes outside the set, including non-ASCII
/// text, are copied verbatim.
///
/// ```
/// use mail_url::pct_enc::{encode, URL_RESERVED};
///
/// assert_eq!(encode("user@host", URL_RESERVED), "user@host");
/// assert_eq!(encode("a/b:c", URL_RESERVED), "a%2Fb%3Ac");
/// ```
#[must_use]
pub fn encode(src: &str, reserved: ReservedSet) -> String {
    encode_bounded(src, reserved, usize::MAX)
}

/// Like [`encode`], but stops before the output would exceed `limit` bytes.
///
/// Truncation is clean: a partial escape is never written, and the output
/// is always valid UTF-8.
#[must_use]
pub fn encode_bounded(src: &str, reserved: ReservedSet, limit: usize) -> String {
    let mut out = String::new();
    for ch in src.chars() {
        if ch.is_ascii() && (ch == '%' || reserved.contains(ch as u8)) {
            if out.len() + 3 > limit {
                break;
            }
            let x = ch as u8;
            out.push('%');
            out.push(HEX_UPPER[(x >> 4) as usize] as char);
            out.push(HEX_UPPER[(x & 0xf) as usize] as char);
        } else {
            if out.len() + ch.len_utf8() > limit {
                break;
            }
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Result<alloc::vec::Vec<u8>, ParseError> {
        let mut buf = s.as_bytes().to_vec();
        let n = decode_in_place(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    #[test]
    fn decodes_in_place() {
        assert_eq!(decode("hello%20world").unwrap(), b"hello world");
        assert_eq!(decode("%41%6a%6A").unwrap(), b"Ajj");
        assert_eq!(decode("plain").unwrap(), b"plain");
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn rejects_bad_escapes() {
        for s in ["%", "%2", "%2x", "%g0", "a%", "a%1"] {
            let e = decode(s).unwrap_err();
            assert_eq!(e.kind(), ParseErrorKind::InvalidEscape);
        }
        assert_eq!(decode("ab%").unwrap_err().index(), 2);
    }

    #[test]
    fn encodes_reserved() {
        assert_eq!(encode("/ :", URL_RESERVED), "%2F %3A");
        // '%' is escaped even when the set omits it
        assert_eq!(encode("100%", ReservedSet::new(b"")), "100%25");
    }

    #[test]
    fn bounded_never_splits_an_escape() {
        assert_eq!(encode_bounded("ab/cd", URL_RESERVED, 4), "ab");
        assert_eq!(encode_bounded("ab/cd", URL_RESERVED, 5), "ab%2F");
        assert_eq!(encode_bounded("ab/cd", URL_RESERVED, 6), "ab%2Fc");
    }
}
