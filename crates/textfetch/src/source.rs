//! Readable character producers consumed by the copy loop.

use std::io;
use std::str::{Chars, from_utf8};

/// A blocking producer of characters.
///
/// Sources fill buffer prefixes on demand and signal end-of-data by
/// returning `Ok(0)`; once exhausted they keep returning `Ok(0)`. Calls
/// block until at least one character is available or the source is
/// exhausted.
pub trait TextSource {
    /// Fills a prefix of `buf` with the next characters.
    ///
    /// Returns the number of characters produced, at most `buf.len()`, or
    /// `Ok(0)` once the source is exhausted (or when `buf` is empty).
    /// Implementations fill from offset zero and never skip slots.
    fn read(&mut self, buf: &mut [char]) -> io::Result<usize>;

    /// Releases any resources held by the source.
    ///
    /// The default implementation does nothing. Sources backed by OS
    /// resources can override this; the copy layer calls it only when asked
    /// to via [`CopyOptions::close_source`](crate::CopyOptions::close_source).
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The always-exhausted source.
///
/// Substituted by the copy layer when the caller passes no source, so the
/// operation behaves as if there were nothing to read.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl TextSource for EmptySource {
    fn read(&mut self, _buf: &mut [char]) -> io::Result<usize> {
        Ok(0)
    }
}

/// Reads out the characters of a borrowed string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source over the characters of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl TextSource for StrSource<'_> {
    fn read(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut filled = 0;
        for slot in buf.iter_mut() {
            let Some(c) = self.chars.next() else { break };
            *slot = c;
            filled += 1;
        }
        Ok(filled)
    }
}

/// Adapts any character iterator into a source.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = char>,
{
    /// Creates a source draining `iter`.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I> TextSource for IterSource<I>
where
    I: Iterator<Item = char>,
{
    fn read(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut filled = 0;
        for slot in buf.iter_mut() {
            let Some(c) = self.iter.next() else { break };
            *slot = c;
            filled += 1;
        }
        Ok(filled)
    }
}

/// How many bytes to pull from the underlying reader per refill.
const BYTE_CHUNK: usize = 4096;

/// Incrementally decodes UTF-8 text from any byte reader.
///
/// Partial multi-byte sequences are carried across read boundaries, so the
/// underlying reader may hand out bytes at any granularity. Malformed
/// sequences, and input that ends in the middle of a sequence, surface as
/// [`io::ErrorKind::InvalidData`].
#[derive(Debug)]
pub struct Utf8Source<R> {
    inner: R,
    pending: Vec<u8>,
    eof: bool,
}

impl<R: io::Read> Utf8Source<R> {
    /// Creates a source decoding UTF-8 from `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            eof: false,
        }
    }

    /// Consumes the source, returning the underlying reader.
    ///
    /// Bytes already pulled from the reader but not yet decoded are lost.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Decodes buffered bytes into `buf`, returning the character count.
    ///
    /// Returns `Ok(0)` when the buffered bytes hold no complete character;
    /// an incomplete trailing sequence stays buffered for the next refill.
    fn decode_pending(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let valid = match from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(error) => {
                if error.valid_up_to() == 0 {
                    if error.error_len().is_some() {
                        return Err(malformed());
                    }
                    return Ok(0);
                }
                error.valid_up_to()
            }
        };

        let Ok(text) = from_utf8(&self.pending[..valid]) else {
            // Unreachable: `valid` bounds a valid prefix.
            return Err(malformed());
        };

        let mut filled = 0;
        let mut consumed = 0;
        for c in text.chars() {
            if filled == buf.len() {
                break;
            }
            buf[filled] = c;
            filled += 1;
            consumed += c.len_utf8();
        }

        self.pending.drain(..consumed);
        Ok(filled)
    }
}

impl<R: io::Read> TextSource for Utf8Source<R> {
    fn read(&mut self, buf: &mut [char]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            let decoded = self.decode_pending(buf)?;
            if decoded > 0 {
                return Ok(decoded);
            }

            if self.eof {
                if self.pending.is_empty() {
                    return Ok(0);
                }
                return Err(truncated());
            }

            let mut chunk = [0u8; BYTE_CHUNK];
            let count = self.inner.read(&mut chunk)?;
            if count == 0 {
                self.eof = true;
            } else {
                self.pending.extend_from_slice(&chunk[..count]);
            }
        }
    }
}

fn malformed() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "malformed UTF-8 sequence in input")
}

fn truncated() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "input ends inside a UTF-8 sequence")
}
