#![no_main]
use libfuzzer_sys::fuzz_target;
use mail_url::{Url, UrlFlags};

// Components are stored decoded and the serializer re-escapes only the
// reserved set, so decoded bytes like a raw `%` or `?` in a host need
// not reparse identically. What must always hold: parsing never panics,
// every parsed URL serializes, and the canonical scheme spelling
// survives a reparse.
fuzz_target!(|data: &str| {
    let Ok(u) = Url::parse(data) else {
        return;
    };
    let s = u.to_url_string(UrlFlags::empty()).unwrap();
    if let Ok(back) = Url::parse(&s) {
        assert_eq!(back.scheme(), u.scheme());
    }
});
