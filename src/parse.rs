//! The slicing parser.
//!
//! The parser works on a single mutable copy of the input. Each step
//! carves the copy into byte ranges; percent escapes are decoded in place
//! inside each range, which can only shrink it. The finished [`Url`] owns
//! the copy, and every component is a range into it.

use crate::error::{ParseError, ParseErrorKind::*};
use crate::pct_enc;
use crate::scheme::UrlScheme;
use crate::{QueryPair, Span, Url};

use alloc::vec::Vec;
use core::str;

fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&x| x == needle)
}

fn rfind(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().rposition(|&x| x == needle)
}

/// Decodes `buf[start..end]` in place and validates the result as UTF-8.
///
/// Returns the span of the decoded text; bytes between the new and old end
/// of the range are left stale and unreferenced.
fn decode_span(buf: &mut [u8], start: usize, end: usize) -> Result<Span, ParseError> {
    let n = pct_enc::decode_in_place(&mut buf[start..end])
        .map_err(|e| ParseError::new(start + e.index(), e.kind()))?;
    if let Err(e) = str::from_utf8(&buf[start..start + n]) {
        // decoded octets must still form valid UTF-8
        return Err(ParseError::new(start + e.valid_up_to(), InvalidEscape));
    }
    Ok(Span::new(start, start + n))
}

fn parse_port(bytes: &[u8], index: usize) -> Result<u16, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::new(index, InvalidPort));
    }
    let mut port = 0u32;
    for &x in bytes {
        if !x.is_ascii_digit() {
            return Err(ParseError::new(index, InvalidPort));
        }
        port = port * 10 + (x - b'0') as u32;
        if port > u16::MAX as u32 {
            return Err(ParseError::new(index, InvalidPort));
        }
    }
    Ok(port as u16)
}

/// Splits `buf[start..end]` on `&`, each segment on its first `=`, and
/// decodes both sides in place.
///
/// A segment without `=` yields a pair with no value; an empty segment
/// yields an empty name and no value. Pairs are pushed in source order.
fn parse_query(
    buf: &mut [u8],
    start: usize,
    end: usize,
    out: &mut Vec<QueryPair>,
) -> Result<(), ParseError> {
    let mut seg_start = start;
    loop {
        let seg_end = match find(&buf[seg_start..end], b'&') {
            Some(i) => seg_start + i,
            None => end,
        };
        let pair = match find(&buf[seg_start..seg_end], b'=') {
            Some(i) => {
                let eq = seg_start + i;
                QueryPair {
                    name: decode_span(buf, seg_start, eq)?,
                    value: Some(decode_span(buf, eq + 1, seg_end)?),
                }
            }
            None => QueryPair {
                name: decode_span(buf, seg_start, seg_end)?,
                value: None,
            },
        };
        out.push(pair);
        if seg_end == end {
            return Ok(());
        }
        seg_start = seg_end + 1;
    }
}

pub(crate) fn parse(input: &str) -> Result<Url, ParseError> {
    if input.is_empty() {
        return Err(ParseError::new(0, EmptyInput));
    }

    let colon = match input.bytes().position(|x| x == b':') {
        Some(i) => i,
        None => return Err(ParseError::new(0, UnknownScheme)),
    };
    let scheme = UrlScheme::from_name(&input[..colon]);
    if scheme == UrlScheme::Unknown {
        return Err(ParseError::new(0, UnknownScheme));
    }

    let mut buf = input.as_bytes().to_vec();
    let mut user = None;
    let mut pass = None;
    let mut host = None;
    let mut port = 0;
    let mut path = None;
    let mut query = Vec::new();

    let rest = colon + 1;
    let mut end = buf.len();

    // The query separator is the *last* '?', so that a '?' in userinfo
    // stays part of the authority. No-authority schemes (mailto, notmuch)
    // carry query strings too, so this happens before the '//' check.
    if let Some(i) = rfind(&buf[rest..end], b'?') {
        parse_query(&mut buf, rest + i + 1, end, &mut query)?;
        end = rest + i;
    }

    if buf[rest..end].starts_with(b"//") {
        let auth_start = rest + 2;

        // the authority ends at the first '/'; everything after is the path
        let mut auth_end = end;
        let mut path_sep = None;
        if let Some(i) = find(&buf[auth_start..end], b'/') {
            auth_end = auth_start + i;
            path_sep = Some(auth_end);
        }

        // userinfo: the *last* '@' separates it from the host, so a raw
        // '@' in the user part is tolerated
        let mut host_start = auth_start;
        if let Some(i) = rfind(&buf[auth_start..auth_end], b'@') {
            let ui_end = auth_start + i;
            host_start = ui_end + 1;
            match find(&buf[auth_start..ui_end], b':') {
                Some(j) => {
                    let sep = auth_start + j;
                    user = Some(decode_span(&mut buf, auth_start, sep)?);
                    pass = Some(decode_span(&mut buf, sep + 1, ui_end)?);
                }
                None => user = Some(decode_span(&mut buf, auth_start, ui_end)?),
            }
        }

        // host and port; brackets around an IPv6 literal are stripped
        let (raw_start, raw_end, after) = if buf.get(host_start) == Some(&b'[') {
            match find(&buf[host_start + 1..auth_end], b']') {
                Some(i) => {
                    let close = host_start + 1 + i;
                    (host_start + 1, close, close + 1)
                }
                None => return Err(ParseError::new(host_start, Truncated)),
            }
        } else {
            match find(&buf[host_start..auth_end], b':') {
                Some(i) => (host_start, host_start + i, host_start + i),
                None => (host_start, auth_end, auth_end),
            }
        };

        if after < auth_end {
            if buf[after] != b':' {
                return Err(ParseError::new(after, InvalidPort));
            }
            port = parse_port(&buf[after + 1..auth_end], after + 1)?;
        }

        let host_span = decode_span(&mut buf, raw_start, raw_end)?;

        if let Some(sep) = path_sep {
            let span = decode_span(&mut buf, sep + 1, end)?;
            if host_span.is_empty() {
                // no host: keep the consumed '/' so the path stays absolute
                path = Some(span.with_start(sep));
            } else {
                path = Some(span);
            }
        }
        if !host_span.is_empty() {
            host = Some(host_span);
        }
    } else {
        // no authority: the whole remainder is the path
        path = Some(decode_span(&mut buf, rest, end)?);
    }

    Ok(Url {
        src: buf.into_boxed_slice(),
        scheme,
        user,
        pass,
        host,
        port,
        path,
        query,
    })
}
