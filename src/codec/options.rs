//! Parser configuration.

/// Default upper bound on a single decoded key or value (16 MiB).
pub const DEFAULT_MAX_FIELD_LEN: usize = 16 * 1024 * 1024;

/// How the parser decodes the letter escapes `\b \f \n \r \t`.
///
/// Deployed peers decode these escapes to the letter itself (`\n` becomes
/// `n`), while the serializer writes control bytes as letter escapes. The two
/// directions are therefore not inverses for those five bytes. `Literal`
/// keeps that behavior for wire compatibility; `Control` decodes to the
/// control byte so that every header round-trips exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// `\n` decodes to `n`.
    #[default]
    Literal,
    /// `\n` decodes to `0x0a`.
    Control,
}

impl EscapeMode {
    /// Decode the letter following `\` (one of `b f n r t`).
    #[inline]
    pub(crate) fn decode_letter(self, letter: u8) -> u8 {
        match self {
            EscapeMode::Literal => letter,
            EscapeMode::Control => match letter {
                b'b' => 0x08,
                b'f' => 0x0c,
                b'n' => b'\n',
                b'r' => b'\r',
                b't' => b'\t',
                other => other,
            },
        }
    }
}

/// Options for decoding headers.
///
/// # Example
///
/// ```
/// use ptp_header::codec::{EscapeMode, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_escape_mode(EscapeMode::Control)
///     .with_max_field_len(4096);
/// assert_eq!(options.escape_mode, EscapeMode::Control);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Decoding of `\b \f \n \r \t`.
    pub escape_mode: EscapeMode,
    /// Maximum decoded length of a key or value, in bytes.
    pub max_field_len: usize,
}

impl ParseOptions {
    /// Default options: literal escapes, 16 MiB field limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the escape decoding mode.
    pub fn with_escape_mode(mut self, mode: EscapeMode) -> Self {
        self.escape_mode = mode;
        self
    }

    /// Set the maximum decoded field length.
    pub fn with_max_field_len(mut self, limit: usize) -> Self {
        self.max_field_len = limit;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            escape_mode: EscapeMode::default(),
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}
