//! Byte-at-a-time header parser.
//!
//! The parser is a sans-IO state machine: callers feed bytes one at a time
//! and receive a [`Header`] when the closing `}` is consumed. It never reads
//! past that brace, so the next byte in the caller's stream is exactly the
//! one following the header.
//!
//! ```text
//! SeekingOpen       --{-->  ExpectKeyStart
//! ExpectKeyStart    --"-->  InKey            --}--> Done
//! InKey             --"-->  ExpectColon      --\--> InKeyEscape --> InKey
//! ExpectColon       --:-->  ExpectValueStart
//! ExpectValueStart  --"-->  InValue
//! InValue           --"-->  ExpectCommaOrEnd --\--> InValueEscape --> InValue
//! ExpectCommaOrEnd  --,-->  ExpectKeyStart   --}--> Done
//! ```

use std::mem;

use crate::error::{ParseError, Result};
use crate::header::Header;

use super::options::ParseOptions;

/// Progress through an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    /// Just consumed `\`.
    Start,
    /// Consumed `\u`, need the first `0`.
    UnicodeFirstZero,
    /// Consumed `\u0`, need the second `0`.
    UnicodeSecondZero,
    /// Consumed `\u00`, need the high hex digit.
    HexHigh,
    /// Need the low hex digit; carries the high nibble.
    HexLow(u8),
}

/// Which accumulator a quoted field writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Key,
    Value,
}

impl Field {
    #[inline]
    fn inside(self) -> State {
        match self {
            Field::Key => State::InKey,
            Field::Value => State::InValue,
        }
    }

    #[inline]
    fn escaping(self, escape: Escape) -> State {
        match self {
            Field::Key => State::InKeyEscape(escape),
            Field::Value => State::InValueEscape(escape),
        }
    }
}

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Skipping input until `{`.
    SeekingOpen,
    /// Expecting `"` to open a key, or `}` to close the header.
    ExpectKeyStart,
    InKey,
    InKeyEscape(Escape),
    /// Key closed, expecting `:`.
    ExpectColon,
    /// Expecting `"` to open a value.
    ExpectValueStart,
    InValue,
    InValueEscape(Escape),
    /// Value closed and committed, expecting `,` or `}`.
    ExpectCommaOrEnd,
    /// Header complete; behaves like `SeekingOpen` for further input.
    Done,
}

/// Incremental header parser.
///
/// # Example
///
/// ```
/// use ptp_header::codec::Parser;
///
/// let mut parser = Parser::new();
/// let mut parsed = None;
/// for &byte in br#"noise {"seed":"7"} tail"# {
///     if let Some(header) = parser.feed(byte).unwrap() {
///         parsed = Some(header);
///         break;
///     }
/// }
/// assert_eq!(parsed.unwrap().get("seed"), Some("7"));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    key: Vec<u8>,
    value: Vec<u8>,
    header: Header,
    options: ParseOptions,
}

impl Parser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            state: State::SeekingOpen,
            key: Vec::new(),
            value: Vec::new(),
            header: Header::new(),
            options,
        }
    }

    /// Options this parser was built with.
    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Check if a header has been opened but not yet closed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !matches!(self.state, State::SeekingOpen | State::Done)
    }

    /// Feed one byte.
    ///
    /// Returns `Ok(Some(header))` when the byte closes a header, `Ok(None)`
    /// when more input is needed.
    ///
    /// # Errors
    ///
    /// Returns the syntax error the byte triggers. The parser is reset and
    /// discards the partial header; feeding more bytes starts a fresh search
    /// for `{`.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Header>> {
        let result = self.step(byte);
        if result.is_err() {
            self.reset();
        }
        result
    }

    /// Signal end of input.
    ///
    /// Returns an empty header if no `{` was pending (absence of a header is
    /// not an error).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedEnd`] if a header was open.
    pub fn finish(&mut self) -> Result<Header> {
        let pending = self.is_pending();
        self.reset();
        if pending {
            Err(ParseError::UnexpectedEnd)
        } else {
            Ok(Header::new())
        }
    }

    /// Drop any partial header and go back to searching for `{`.
    pub fn reset(&mut self) {
        self.state = State::SeekingOpen;
        self.key.clear();
        self.value.clear();
        self.header.clear();
    }

    fn step(&mut self, byte: u8) -> Result<Option<Header>> {
        match self.state {
            State::SeekingOpen | State::Done => {
                if byte == b'{' {
                    self.state = State::ExpectKeyStart;
                }
            }
            State::ExpectKeyStart => match byte {
                b' ' => {}
                b'"' => self.state = State::InKey,
                b'}' => {
                    self.state = State::Done;
                    return Ok(Some(mem::take(&mut self.header)));
                }
                _ => return Err(ParseError::DoubleQuotesExpected),
            },
            State::InKey => self.field_byte(Field::Key, byte)?,
            State::InKeyEscape(escape) => self.escape_byte(Field::Key, escape, byte)?,
            State::ExpectColon => match byte {
                b' ' => {}
                b':' => self.state = State::ExpectValueStart,
                _ => return Err(ParseError::ColonExpected),
            },
            State::ExpectValueStart => match byte {
                b' ' => {}
                b'"' => self.state = State::InValue,
                _ => return Err(ParseError::DoubleQuotesExpected),
            },
            State::InValue => self.field_byte(Field::Value, byte)?,
            State::InValueEscape(escape) => self.escape_byte(Field::Value, escape, byte)?,
            State::ExpectCommaOrEnd => match byte {
                b' ' => {}
                b',' => self.state = State::ExpectKeyStart,
                b'}' => {
                    self.state = State::Done;
                    return Ok(Some(mem::take(&mut self.header)));
                }
                _ => return Err(ParseError::CommaExpected),
            },
        }
        Ok(None)
    }

    fn field_byte(&mut self, field: Field, byte: u8) -> Result<()> {
        match byte {
            b'\\' => self.state = field.escaping(Escape::Start),
            b'"' => match field {
                Field::Key => self.state = State::ExpectColon,
                Field::Value => {
                    self.commit();
                    self.state = State::ExpectCommaOrEnd;
                }
            },
            0x00..=0x1f => return Err(ParseError::ControlChar),
            _ => self.push(field, byte)?,
        }
        Ok(())
    }

    fn escape_byte(&mut self, field: Field, escape: Escape, byte: u8) -> Result<()> {
        match escape {
            Escape::Start => match byte {
                b'"' | b'\\' => {
                    self.push(field, byte)?;
                    self.state = field.inside();
                }
                b'b' | b'f' | b'n' | b'r' | b't' => {
                    let decoded = self.options.escape_mode.decode_letter(byte);
                    self.push(field, decoded)?;
                    self.state = field.inside();
                }
                b'u' => self.state = field.escaping(Escape::UnicodeFirstZero),
                _ => return Err(ParseError::BadEscape),
            },
            Escape::UnicodeFirstZero | Escape::UnicodeSecondZero => {
                if byte != b'0' {
                    return Err(ParseError::UnicodeNotSupported);
                }
                self.state = field.escaping(match escape {
                    Escape::UnicodeFirstZero => Escape::UnicodeSecondZero,
                    _ => Escape::HexHigh,
                });
            }
            Escape::HexHigh => {
                let high = hex_value(byte).ok_or(ParseError::BadHexString)?;
                self.state = field.escaping(Escape::HexLow(high));
            }
            Escape::HexLow(high) => {
                let low = hex_value(byte).ok_or(ParseError::BadHexString)?;
                self.push(field, (high << 4) | low)?;
                self.state = field.inside();
            }
        }
        Ok(())
    }

    fn push(&mut self, field: Field, byte: u8) -> Result<()> {
        let limit = self.options.max_field_len;
        let buf = match field {
            Field::Key => &mut self.key,
            Field::Value => &mut self.value,
        };
        if buf.len() >= limit {
            return Err(ParseError::FieldTooLarge);
        }
        buf.push(byte);
        Ok(())
    }

    /// Move the accumulated key/value pair into the header.
    fn commit(&mut self) {
        let value = mem::take(&mut self.value);
        if !self.header.insert(self.key.as_slice(), value) {
            tracing::debug!(
                key = %String::from_utf8_lossy(&self.key),
                "duplicate header key ignored"
            );
        }
        self.key.clear();
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::SeekingOpen => "SeekingOpen",
            State::ExpectKeyStart => "ExpectKeyStart",
            State::InKey => "InKey",
            State::InKeyEscape(_) => "InKeyEscape",
            State::ExpectColon => "ExpectColon",
            State::ExpectValueStart => "ExpectValueStart",
            State::InValue => "InValue",
            State::InValueEscape(_) => "InValueEscape",
            State::ExpectCommaOrEnd => "ExpectCommaOrEnd",
            State::Done => "Done",
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
