//! Error types for ptp-header.

use thiserror::Error;

/// Syntax error raised while decoding a header from the wire.
///
/// Every variant maps to a short, stable reason string (see [`ParseError::reason`])
/// that peers and log scrapers can match on. A failed parse never yields a
/// partial header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A field did not start with `"`.
    #[error("double quotes expected")]
    DoubleQuotesExpected,

    /// A key was not followed by `:`.
    #[error("colon expected")]
    ColonExpected,

    /// A value was not followed by `,` or `}`.
    #[error("comma expected")]
    CommaExpected,

    /// Raw byte in `0x00..=0x1f` inside a quoted field.
    #[error("control char not allowed")]
    ControlChar,

    /// `\u` escape other than the `\u00XX` form.
    #[error("unicode not supported")]
    UnicodeNotSupported,

    /// Non-hex digit in a `\u00XX` escape.
    #[error("bad hex string")]
    BadHexString,

    /// Unknown character after `\`.
    #[error("bad char after escape")]
    BadEscape,

    /// Stream ended (or failed) inside an open header.
    #[error("unexpected end")]
    UnexpectedEnd,

    /// Decoded key or value exceeds the configured limit.
    #[error("field too large")]
    FieldTooLarge,
}

impl ParseError {
    /// Short machine-checkable reason, identical to the `Display` output.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::DoubleQuotesExpected => "double quotes expected",
            ParseError::ColonExpected => "colon expected",
            ParseError::CommaExpected => "comma expected",
            ParseError::ControlChar => "control char not allowed",
            ParseError::UnicodeNotSupported => "unicode not supported",
            ParseError::BadHexString => "bad hex string",
            ParseError::BadEscape => "bad char after escape",
            ParseError::UnexpectedEnd => "unexpected end",
            ParseError::FieldTooLarge => "field too large",
        }
    }
}

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;
