use crate::error::{ParseError, ParseErrorKind, UnknownSchemeError};
use crate::pct_enc::{self, ReservedSet, URL_RESERVED};
use crate::{Query, Url, UrlScheme};

use alloc::string::String;
use core::fmt::{self, Write};

bitflags::bitflags! {
    /// Flags controlling [`Url::to_url_string`].
    pub struct UrlFlags: u8 {
        /// Omit the authority; write only `scheme:path` (and the query).
        const PATH_ONLY = 1;
    }
}

/// Query names and values escape `=` on top of the base set.
const QUERY_RESERVED: ReservedSet = URL_RESERVED.or(ReservedSet::new(b"="));

impl Url {
    /// Writes the canonical string form.
    ///
    /// The user part is percent-encoded with [`URL_RESERVED`]; the
    /// password is never written. A host containing `:` is taken for an
    /// IPv6 literal and emitted in brackets. A non-zero port is written
    /// after the host. The path is written verbatim (it is stored decoded;
    /// re-encode externally if reserved bytes inside it matter). Query
    /// pairs follow as `?name=value&…`, both sides percent-encoded, a pair
    /// with an absent value written without `=`.
    ///
    /// With [`UrlFlags::PATH_ONLY`] the whole authority is omitted and
    /// only `scheme:path` plus the query is written.
    ///
    /// # Errors
    ///
    /// Fails when the scheme is [`UrlScheme::Unknown`], which cannot
    /// happen for a `Url` returned by [`Url::parse`].
    pub fn to_url_string(&self, flags: UrlFlags) -> Result<String, UnknownSchemeError> {
        let name = self.scheme().name().ok_or(UnknownSchemeError(()))?;
        let mut out = String::with_capacity(self.src.len() + 2);
        out.push_str(name);
        out.push(':');

        if let Some(host) = self.host() {
            if !flags.contains(UrlFlags::PATH_ONLY) {
                out.push_str("//");
                if let Some(user) = self.user() {
                    out.push_str(&pct_enc::encode(user, URL_RESERVED));
                    out.push('@');
                }
                if host.contains(':') {
                    out.push('[');
                    out.push_str(host);
                    out.push(']');
                } else {
                    out.push_str(host);
                }
                if self.port() != 0 {
                    // infallible: writing to a String cannot error
                    let _ = write!(out, ":{}/", self.port());
                } else {
                    out.push('/');
                }
            }
        }

        if let Some(path) = self.path() {
            out.push_str(path);
        }

        if !self.query.is_empty() {
            out.push('?');
            for (i, (name, value)) in self.query().enumerate() {
                if i > 0 {
                    out.push('&');
                }
                out.push_str(&pct_enc::encode(name, QUERY_RESERVED));
                if let Some(value) = value {
                    out.push('=');
                    out.push_str(&pct_enc::encode(value, QUERY_RESERVED));
                }
            }
        }

        Ok(out)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::EmptyInput => return f.write_str("empty input"),
            ParseErrorKind::UnknownScheme => "unknown URL scheme at index ",
            ParseErrorKind::InvalidEscape => "invalid percent escape at index ",
            ParseErrorKind::InvalidPort => "invalid port number at index ",
            ParseErrorKind::Truncated => "unclosed IP literal at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl fmt::Display for UnknownSchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot serialize a URL with an unknown scheme")
    }
}

impl fmt::Display for UrlScheme {
    /// Writes the canonical name; `unknown` for the sentinel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("unknown"))
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Url")
            .field("scheme", &self.scheme())
            .field("user", &self.user())
            .field("pass", &self.pass())
            .field("host", &self.host())
            .field("port", &self.port())
            .field("path", &self.path())
            .field("query", &self.query())
            .finish()
    }
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
