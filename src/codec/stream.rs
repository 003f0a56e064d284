//! Stream entry points: blocking `std::io` and async tokio.
//!
//! Readers pull one byte at a time so the stream is never consumed past the
//! closing `}`. Wrap unbuffered sources (sockets, pipes, files) in a
//! `BufReader` to avoid a syscall per byte.
//!
//! Read failures are not a separate error kind: a failing stream looks like a
//! stream that ended, which is either "no header" (before `{`) or
//! [`ParseError::UnexpectedEnd`](crate::ParseError::UnexpectedEnd) (inside
//! one).

use std::io::{self, Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::header::Header;

use super::encode::encode;
use super::options::ParseOptions;
use super::parser::Parser;

/// Parse a header from a byte slice with default options.
///
/// Input after the closing `}` is ignored.
pub fn decode(bytes: &[u8]) -> Result<Header> {
    decode_with(bytes, ParseOptions::default())
}

/// Parse a header from a byte slice with custom options.
pub fn decode_with(mut bytes: &[u8], options: ParseOptions) -> Result<Header> {
    read_header_with(&mut bytes, options)
}

/// Read one header from a blocking stream with default options.
///
/// Returns an empty header if the stream ends before any `{`.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use ptp_header::codec::read_header;
///
/// let mut stream = Cursor::new(br#"{"command":"stop"}{"command":"resume"}"#.to_vec());
/// assert_eq!(read_header(&mut stream).unwrap().command(), Some("stop"));
/// assert_eq!(read_header(&mut stream).unwrap().command(), Some("resume"));
/// assert!(read_header(&mut stream).unwrap().is_empty());
/// ```
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<Header> {
    read_header_with(reader, ParseOptions::default())
}

/// Read one header from a blocking stream with custom options.
pub fn read_header_with<R: Read + ?Sized>(reader: &mut R, options: ParseOptions) -> Result<Header> {
    let mut parser = Parser::with_options(options);
    while let Some(byte) = next_byte(reader) {
        match parser.feed(byte) {
            Ok(Some(header)) => return Ok(header),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("Header parse failed: {}", e);
                return Err(e);
            }
        }
    }
    parser.finish()
}

/// Write a header's wire text to a blocking stream.
///
/// Does not flush.
pub fn write_header<W: Write + ?Sized>(writer: &mut W, header: &Header) -> io::Result<()> {
    writer.write_all(&encode(header))
}

/// Read one header from an async stream with default options.
pub async fn read_header_async<R>(reader: &mut R) -> Result<Header>
where
    R: AsyncRead + Unpin + ?Sized,
{
    read_header_async_with(reader, ParseOptions::default()).await
}

/// Read one header from an async stream with custom options.
pub async fn read_header_async_with<R>(reader: &mut R, options: ParseOptions) -> Result<Header>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut parser = Parser::with_options(options);
    loop {
        let byte = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(e) => {
                if e.kind() != io::ErrorKind::UnexpectedEof {
                    tracing::debug!("Header read failed: {}", e);
                }
                return parser.finish();
            }
        };
        match parser.feed(byte) {
            Ok(Some(header)) => return Ok(header),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("Header parse failed: {}", e);
                return Err(e);
            }
        }
    }
}

/// Write a header's wire text to an async stream.
///
/// Does not flush.
pub async fn write_header_async<W>(writer: &mut W, header: &Header) -> io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    writer.write_all(&encode(header)).await
}

/// Read a single byte, retrying on `Interrupted`; `None` on EOF or failure.
fn next_byte<R: Read + ?Sized>(reader: &mut R) -> Option<u8> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return None,
            Ok(_) => return Some(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("Header read failed: {}", e);
                return None;
            }
        }
    }
}
