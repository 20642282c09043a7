use self::UrlScheme::*;

/// A recognized URL scheme.
///
/// The set is closed: mail software dispatches on these tags and nothing
/// else. [`Unknown`] is a sentinel meaning "not one of the recognized
/// schemes"; [`Url::parse`](crate::Url::parse) never produces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrlScheme {
    /// Not one of the recognized schemes.
    Unknown,
    /// `file:` local file path.
    File,
    /// `pop://` POP3 mailbox.
    Pop,
    /// `pops://` POP3 over TLS.
    Pops,
    /// `imap://` IMAP mailbox.
    Imap,
    /// `imaps://` IMAP over TLS.
    Imaps,
    /// `nntp://` (or `news:`) NNTP newsgroup.
    Nntp,
    /// `nntps://` (or `snews:`) NNTP over TLS.
    Nntps,
    /// `smtp://` SMTP relay.
    Smtp,
    /// `smtps://` SMTP over TLS.
    Smtps,
    /// `mailto:` message recipient.
    Mailto,
    /// `notmuch://` virtual mailbox query.
    Notmuch,
}

/// Longest scheme prefix worth looking up.
const MAX_SCHEME_LEN: usize = 16;

/// Scheme name table. `news` and `snews` are parse-only aliases; the
/// canonical spellings for emission are pinned in [`UrlScheme::name`].
const SCHEMES: &[(&str, UrlScheme)] = &[
    ("file", File),
    ("imap", Imap),
    ("imaps", Imaps),
    ("pop", Pop),
    ("pops", Pops),
    ("news", Nntp),
    ("nntp", Nntp),
    ("snews", Nntps),
    ("nntps", Nntps),
    ("mailto", Mailto),
    ("notmuch", Notmuch),
    ("smtp", Smtp),
    ("smtps", Smtps),
];

impl UrlScheme {
    /// Classifies a scheme name, given without the trailing `:`.
    ///
    /// Matching is ASCII-case-insensitive. Returns [`Unknown`] when the
    /// name is empty, longer than any recognized scheme, or simply not in
    /// the table.
    ///
    /// ```
    /// use mail_url::UrlScheme;
    ///
    /// assert_eq!(UrlScheme::from_name("IMAPS"), UrlScheme::Imaps);
    /// assert_eq!(UrlScheme::from_name("news"), UrlScheme::Nntp);
    /// assert_eq!(UrlScheme::from_name("gopher"), UrlScheme::Unknown);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> UrlScheme {
        if name.is_empty() || name.len() > MAX_SCHEME_LEN {
            return Unknown;
        }
        for &(s, scheme) in SCHEMES {
            if s.eq_ignore_ascii_case(name) {
                return scheme;
            }
        }
        Unknown
    }

    /// Returns the canonical lower-case name, or `None` for [`Unknown`].
    ///
    /// The aliases normalize: a URL parsed as `news:` re-emits as `nntp`,
    /// and `snews:` as `nntps`.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Unknown => None,
            File => Some("file"),
            Pop => Some("pop"),
            Pops => Some("pops"),
            Imap => Some("imap"),
            Imaps => Some("imaps"),
            Nntp => Some("nntp"),
            Nntps => Some("nntps"),
            Smtp => Some("smtp"),
            Smtps => Some("smtps"),
            Mailto => Some("mailto"),
            Notmuch => Some("notmuch"),
        }
    }
}

/// Checks the scheme of a whole URL string without parsing the rest.
///
/// Returns [`Unknown`](UrlScheme::Unknown) when the string contains no `:`.
///
/// ```
/// use mail_url::{check_scheme, UrlScheme};
///
/// assert_eq!(check_scheme("imap://example.com/"), UrlScheme::Imap);
/// assert_eq!(check_scheme("/var/mail/inbox"), UrlScheme::Unknown);
/// ```
#[must_use]
pub fn check_scheme(s: &str) -> UrlScheme {
    match s.split_once(':') {
        Some((prefix, _)) => UrlScheme::from_name(prefix),
        None => Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_case_insensitively() {
        assert_eq!(UrlScheme::from_name("imap"), Imap);
        assert_eq!(UrlScheme::from_name("Imap"), Imap);
        assert_eq!(UrlScheme::from_name("SMTPS"), Smtps);
    }

    #[test]
    fn rejects_unknown_and_oversized() {
        assert_eq!(UrlScheme::from_name(""), Unknown);
        assert_eq!(UrlScheme::from_name("gopher"), Unknown);
        assert_eq!(UrlScheme::from_name("imapimapimapimapimap"), Unknown);
    }

    #[test]
    fn aliases_normalize_on_emit() {
        assert_eq!(UrlScheme::from_name("news"), Nntp);
        assert_eq!(UrlScheme::from_name("snews"), Nntps);
        assert_eq!(Nntp.name(), Some("nntp"));
        assert_eq!(Nntps.name(), Some("nntps"));
        assert_eq!(Unknown.name(), None);
    }

    #[test]
    fn checks_whole_urls() {
        assert_eq!(check_scheme("pops://u@h/"), Pops);
        assert_eq!(check_scheme("no-colon-here"), Unknown);
        assert_eq!(check_scheme(":"), Unknown);
    }
}
