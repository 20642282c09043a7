#![no_main]
use libfuzzer_sys::fuzz_target;
use mail_url::pct_enc::{decode_in_place, encode, ReservedSet, URL_RESERVED};

fuzz_target!(|data: &str| {
    let set = URL_RESERVED.or(ReservedSet::new(b"@?= "));
    let mut buf = encode(data, set).into_bytes();
    let len = decode_in_place(&mut buf).unwrap();
    assert_eq!(&buf[..len], data.as_bytes());

    // decoding arbitrary input must never panic
    let mut raw = data.as_bytes().to_vec();
    let _ = decode_in_place(&mut raw);
});
