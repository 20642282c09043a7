#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Parsing, percent-encoding and serialization of mail URLs.
//!
//! Mail software addresses mailboxes and transports with URLs: `imap://`
//! and `pop://` mailstores, `smtp://` relays, `nntp://` newsgroups,
//! `notmuch://` virtual mailboxes, `mailto:` recipients and `file:` paths.
//! This crate is the parser those backends share. It is deliberately not a
//! general RFC 3986 implementation: it accepts the pragmatic variants mail
//! configuration relies on (empty authorities, unbracketed hosts, `file:`
//! paths without `//`) and normalizes nothing but the scheme.
//!
//! # Examples
//!
//! ```
//! use mail_url::{Url, UrlScheme};
//!
//! let url = Url::parse("imaps://user%40home@mail.example.com:993/INBOX")?;
//! assert_eq!(url.scheme(), UrlScheme::Imaps);
//! assert_eq!(url.user(), Some("user@home"));
//! assert_eq!(url.host(), Some("mail.example.com"));
//! assert_eq!(url.port(), 993);
//! assert_eq!(url.path(), Some("INBOX"));
//! # Ok::<_, mail_url::ParseError>(())
//! ```
//!
//! Percent escapes are decoded once, during parsing, in place over a single
//! copy of the input; every accessor borrows decoded text from that buffer.
//! A [`Url`] is immutable after parsing and releases everything in one go
//! when dropped.
//!
//! # Feature flags
//!
//! - `std` (default): `std::error::Error` impls for the error types.
//! - `serde`: `Serialize`/`Deserialize` for [`Url`] as its string form.
//!   Note that serializing writes the password-less form.

extern crate alloc;

pub mod pct_enc;

mod error;
mod fmt;
mod parse;
mod scheme;

pub use error::{ParseError, ParseErrorKind, UnknownSchemeError};
pub use fmt::UrlFlags;
pub use scheme::{check_scheme, UrlScheme};

use alloc::{boxed::Box, vec::Vec};
use core::hash;
use core::iter::FusedIterator;
use core::slice;
use core::str;

/// A byte range into the backing buffer of a [`Url`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Span {
    start: u32,
    end: u32,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Span {
        debug_assert!(start <= end);
        Span {
            start: start as u32,
            end: end as u32,
        }
    }

    pub(crate) fn with_start(self, start: usize) -> Span {
        Span {
            start: start as u32,
            ..self
        }
    }

    pub(crate) fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// One pair of a query string; ranges into the backing buffer.
#[derive(Clone, Debug)]
pub(crate) struct QueryPair {
    pub(crate) name: Span,
    pub(crate) value: Option<Span>,
}

#[cold]
fn len_overflow() -> ! {
    panic!("input length exceeds i32::MAX");
}

/// A parsed mail URL.
///
/// Created by [`Url::parse`]. The `Url` owns one buffer holding the
/// (decoded-in-place) copy of the input; all component accessors return
/// string slices borrowed from it. Components are stored decoded, so
/// `url.user()` on `pop://user%40host@…` yields `user@host`.
///
/// The query string is kept as an ordered sequence of `(name, value)`
/// pairs: order of first occurrence is preserved and duplicates are
/// retained. See [`Url::query`].
///
/// `Url` is single-owner and immutable; sharing one across threads only
/// requires that it outlive the readers.
#[derive(Clone)]
pub struct Url {
    src: Box<[u8]>,
    scheme: UrlScheme,
    user: Option<Span>,
    pass: Option<Span>,
    host: Option<Span>,
    port: u16,
    path: Option<Span>,
    query: Vec<QueryPair>,
}

impl Url {
    /// Parses a URL.
    ///
    /// The input is copied once; all later accessors borrow from that copy.
    ///
    /// # Errors
    ///
    /// See [`ParseErrorKind`] for the failure modes. Nothing of a failed
    /// parse is observable: either a fully valid `Url` is returned or none
    /// at all.
    ///
    /// # Panics
    ///
    /// Panics if the input length exceeds [`i32::MAX`].
    pub fn parse(s: &str) -> Result<Url, ParseError> {
        if s.len() > i32::MAX as usize {
            len_overflow();
        }
        parse::parse(s)
    }

    fn span(&self, span: Span) -> &str {
        debug_assert!(span.start <= span.end && (span.end as usize) <= self.src.len());
        let bytes = &self.src[span.start as usize..span.end as usize];
        // SAFETY: The parser validated every stored span as UTF-8 after
        // decoding it in place.
        unsafe { str::from_utf8_unchecked(bytes) }
    }

    /// Returns the scheme tag.
    #[inline]
    pub fn scheme(&self) -> UrlScheme {
        self.scheme
    }

    /// Returns the decoded user part of the userinfo.
    ///
    /// Present (possibly empty) whenever the authority contained an `@`.
    #[inline]
    pub fn user(&self) -> Option<&str> {
        self.user.map(|s| self.span(s))
    }

    /// Returns the decoded password part of the userinfo.
    ///
    /// Present whenever the userinfo contained a `:`. The serializer never
    /// writes it back out.
    #[inline]
    pub fn pass(&self) -> Option<&str> {
        self.pass.map(|s| self.span(s))
    }

    /// Returns the decoded host.
    ///
    /// An IPv6 literal is stored without its surrounding brackets, so a
    /// host containing `:` is an address, not a name.
    #[inline]
    pub fn host(&self) -> Option<&str> {
        self.host.map(|s| self.span(s))
    }

    /// Returns the port, with `0` meaning "unspecified".
    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the decoded path.
    ///
    /// For schemes without an authority (`mailto:`, `file:` without `//`)
    /// this is the whole post-scheme remainder. With an authority present
    /// the path excludes the `/` that terminated the authority, except
    /// that a URL with an empty host keeps it: `file:///etc/passwd` parses
    /// with no host and path `/etc/passwd`.
    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.map(|s| self.span(s))
    }

    /// Returns an iterator over the decoded query pairs, in order of first
    /// occurrence, duplicates retained.
    ///
    /// A pair without `=` yields a `None` value, distinct from `Some("")`
    /// for an empty one.
    ///
    /// ```
    /// use mail_url::Url;
    ///
    /// let url = Url::parse("notmuch:///home/u/mail?query=tag%3Ainbox&limit=50")?;
    /// let pairs: Vec<_> = url.query().collect();
    /// assert_eq!(pairs, [("query", Some("tag:inbox")), ("limit", Some("50"))]);
    /// # Ok::<_, mail_url::ParseError>(())
    /// ```
    #[inline]
    pub fn query(&self) -> Query<'_> {
        Query {
            url: self,
            inner: self.query.iter(),
        }
    }
}

impl Default for Url {
    /// Creates an empty URL with [`UrlScheme::Unknown`].
    fn default() -> Url {
        Url {
            src: Box::default(),
            scheme: UrlScheme::Unknown,
            user: None,
            pass: None,
            host: None,
            port: 0,
            path: None,
            query: Vec::new(),
        }
    }
}

impl PartialEq for Url {
    /// Compares componentwise over the decoded fields, so two `Url`s are
    /// equal whenever every accessor agrees.
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.user() == other.user()
            && self.pass() == other.pass()
            && self.host() == other.host()
            && self.port == other.port
            && self.path() == other.path()
            && self.query().eq(other.query())
    }
}

impl Eq for Url {}

impl hash::Hash for Url {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.user().hash(state);
        self.pass().hash(state);
        self.host().hash(state);
        self.port.hash(state);
        self.path().hash(state);
        for pair in self.query() {
            pair.hash(state);
        }
    }
}

/// An iterator over the decoded `(name, value)` pairs of a query string.
///
/// Created by [`Url::query`].
#[derive(Clone)]
pub struct Query<'a> {
    url: &'a Url,
    inner: slice::Iter<'a, QueryPair>,
}

impl<'a> Query<'a> {
    fn resolve(&self, pair: &QueryPair) -> (&'a str, Option<&'a str>) {
        (
            self.url.span(pair.name),
            pair.value.map(|v| self.url.span(v)),
        )
    }
}

impl<'a> Iterator for Query<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| self.resolve(pair))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Query<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|pair| self.resolve(pair))
    }
}

impl ExactSizeIterator for Query<'_> {}

impl FusedIterator for Query<'_> {}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    /// Serializes as the canonical string form. The password is elided,
    /// as by [`Url::to_url_string`].
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.to_url_string(UrlFlags::empty()) {
            Ok(s) => serializer.serialize_str(&s),
            Err(e) => Err(serde::ser::Error::custom(e)),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = alloc::string::String::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_componentwise() {
        let u = Url::parse("imap://u@h:143/INBOX").unwrap();
        let v = Url::parse("imap://u@h:143/INBOX").unwrap();
        let w = Url::parse("imap://u@h:144/INBOX").unwrap();
        assert_eq!(u, v);
        assert_ne!(u, w);
        // decoded equality: the escape spelling does not matter
        let a = Url::parse("pop://user%40host@h/").unwrap();
        let b = Url::parse("pop://%75ser%40host@h/").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hashes_agree_with_eq() {
        use core::hash::{Hash, Hasher};

        fn hash_of(u: &Url) -> u64 {
            let mut s = std::collections::hash_map::DefaultHasher::new();
            u.hash(&mut s);
            s.finish()
        }

        let a = Url::parse("imaps://u@h/INBOX?a=1").unwrap();
        let b = Url::parse("imaps://%75@h/INBOX?a=1").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn default_is_unknown() {
        let u = Url::default();
        assert_eq!(u.scheme(), UrlScheme::Unknown);
        assert_eq!(u.host(), None);
        assert_eq!(u.query().len(), 0);
    }
}
