/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input was empty.
    EmptyInput,
    /// The scheme is missing, or is not one of the recognized mail schemes.
    UnknownScheme,
    /// Invalid percent escape that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the escape.
    InvalidEscape,
    /// The port is empty, contains a non-digit, or exceeds 65535.
    ///
    /// The error index points to the start of the port text.
    InvalidPort,
    /// A bracketed IP literal without a closing "]".
    ///
    /// The error index points to the opening "[".
    Truncated,
}

/// An error occurred when parsing a URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) index: u32,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(index: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            index: index as u32,
            kind,
        }
    }

    /// Returns the index where the error occurred in the input string.
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// An error occurred when serializing a URL whose scheme is unknown.
///
/// A [`Url`] returned by [`Url::parse`] always carries a known scheme, so
/// this can only arise from a [`Url::default`] value.
///
/// [`Url`]: crate::Url
/// [`Url::parse`]: crate::Url::parse
/// [`Url::default`]: crate::Url::default
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownSchemeError(pub(crate) ());

#[cfg(feature = "std")]
impl std::error::Error for UnknownSchemeError {}
