use mail_url::pct_enc::{decode_in_place, encode, encode_bounded, ReservedSet, URL_RESERVED};

fn decode(s: &str) -> Result<Vec<u8>, mail_url::ParseError> {
    let mut buf = s.as_bytes().to_vec();
    let len = decode_in_place(&mut buf)?;
    buf.truncate(len);
    Ok(buf)
}

#[test]
fn decode_mixed_case_hex() {
    assert_eq!(decode("a%2fb%2Fc").unwrap(), b"a/b/c");
    assert_eq!(decode("%00%ff").unwrap(), [0x00, 0xff]);
    assert_eq!(decode("plain").unwrap(), b"plain");
}

#[test]
fn decode_rejects_bad_escapes() {
    assert_eq!(decode("%").unwrap_err().index(), 0);
    assert_eq!(decode("ab%4").unwrap_err().index(), 2);
    assert_eq!(decode("%G1").unwrap_err().index(), 0);
    assert_eq!(decode("ok%zz").unwrap_err().index(), 2);
}

#[test]
fn encode_reserved_and_percent() {
    assert_eq!(encode("a/b:c", URL_RESERVED), "a%2Fb%3Ac");
    // '%' is always escaped so decoding is unambiguous
    assert_eq!(encode("100%", ReservedSet::new(b"")), "100%25");
    assert_eq!(encode("a b", URL_RESERVED), "a b");
}

#[test]
fn encode_uses_uppercase_hex() {
    assert_eq!(encode("&", URL_RESERVED), "%26");
    assert_eq!(encode("\x0b", ReservedSet::new(b"\x0b")), "%0B");
}

#[test]
fn encode_passes_non_ascii_through() {
    assert_eq!(encode("héllo", URL_RESERVED), "héllo");
}

#[test]
fn encode_decode_identity() {
    let set = URL_RESERVED.or(ReservedSet::new(b"@ ?="));
    for s in ["", "user@host", "a b c", "50%/50%", "x?y=z&w", "héllo wörld"] {
        assert_eq!(decode(&encode(s, set)).unwrap(), s.as_bytes());
    }
}

#[test]
fn bounded_encode_never_splits_an_escape() {
    // "%2F" needs 3 bytes; at limit 4 only "a" plus the escape fit
    assert_eq!(encode_bounded("a/b", URL_RESERVED, 4), "a%2F");
    assert_eq!(encode_bounded("a/b", URL_RESERVED, 3), "a");
    assert_eq!(encode_bounded("abc", URL_RESERVED, 2), "ab");
    assert_eq!(encode_bounded("a/b", URL_RESERVED, 0), "");
}

#[test]
fn bounded_encode_never_splits_a_code_point() {
    // 'é' is two bytes in UTF-8
    assert_eq!(encode_bounded("aé", URL_RESERVED, 2), "a");
    assert_eq!(encode_bounded("aé", URL_RESERVED, 3), "aé");
}
