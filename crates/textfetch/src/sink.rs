//! Writable character consumers fed by the copy loop.

use std::fmt;
use std::io;

/// A blocking consumer of characters.
///
/// Sinks accept whole chunks; there is no partial-write reporting. A chunk
/// either lands completely or the sink fails.
pub trait TextSink {
    /// Accepts every character of `chunk`.
    fn write(&mut self, chunk: &[char]) -> io::Result<()>;

    /// Forces buffered characters out to the underlying destination.
    ///
    /// The default implementation does nothing; in-memory sinks have
    /// nothing to force.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Releases any resources held by the sink.
    ///
    /// The default implementation does nothing. The copy layer calls this
    /// only when asked to via
    /// [`CopyOptions::close_sink`](crate::CopyOptions::close_sink).
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The discarding sink.
///
/// Substituted by the copy layer when the caller passes no sink; the source
/// is still drained.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TextSink for NullSink {
    fn write(&mut self, _chunk: &[char]) -> io::Result<()> {
        Ok(())
    }
}

impl TextSink for Vec<char> {
    fn write(&mut self, chunk: &[char]) -> io::Result<()> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

impl TextSink for String {
    fn write(&mut self, chunk: &[char]) -> io::Result<()> {
        self.extend(chunk);
        Ok(())
    }
}

/// Forwards characters to any [`fmt::Write`] destination.
#[derive(Debug)]
pub struct FmtSink<W> {
    inner: W,
}

impl<W: fmt::Write> FmtSink<W> {
    /// Creates a sink appending to `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consumes the sink, returning the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: fmt::Write> TextSink for FmtSink<W> {
    fn write(&mut self, chunk: &[char]) -> io::Result<()> {
        for &c in chunk {
            self.inner
                .write_char(c)
                .map_err(|_| io::Error::other("formatter refused character"))?;
        }
        Ok(())
    }
}

/// Encodes characters as UTF-8 bytes into any [`io::Write`] destination.
///
/// Characters are encoded one at a time; wrap an unbuffered writer in
/// [`io::BufWriter`] to keep syscalls off the per-character path. Closing
/// flushes the underlying writer.
#[derive(Debug)]
pub struct Utf8Sink<W> {
    inner: W,
}

impl<W: io::Write> Utf8Sink<W> {
    /// Creates a sink encoding into `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consumes the sink, returning the underlying writer.
    ///
    /// The writer is not flushed first.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> TextSink for Utf8Sink<W> {
    fn write(&mut self, chunk: &[char]) -> io::Result<()> {
        let mut encoded = [0u8; 4];
        for &c in chunk {
            self.inner.write_all(c.encode_utf8(&mut encoded).as_bytes())?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
