//! The buffered copy loop and its convenience wrappers.

use std::io;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace};

use crate::buffer::{BufferStrategy, ReusedBuffer};
use crate::error::{FetchError, Result};
use crate::event::{FetchEvent, FetchListener, IdleListener};
use crate::sink::{NullSink, TextSink};
use crate::source::{EmptySource, TextSource};

/// Per-call configuration for [`TextFetcher::copy`].
///
/// Collapses the close-after-use flags into one struct with defaulted
/// fields; the default leaves both endpoints open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Close the source after the copy, discarding any close failure.
    pub close_source: bool,
    /// Close the sink after the copy, discarding any close failure.
    pub close_sink: bool,
}

impl CopyOptions {
    /// Options that leave both endpoints open.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            close_source: false,
            close_sink: false,
        }
    }

    /// Sets whether the source is closed after the copy.
    #[must_use]
    pub const fn close_source(mut self, close: bool) -> Self {
        self.close_source = close;
        self
    }

    /// Sets whether the sink is closed after the copy.
    #[must_use]
    pub const fn close_sink(mut self, close: bool) -> Self {
        self.close_sink = close;
        self
    }
}

/// Copies characters from sources to sinks through a checked-out buffer.
///
/// A fetcher drives one copy at a time; the buffer strategy decides whether
/// the transfer buffer is reused across copies ([`ReusedBuffer`], the
/// default) or allocated fresh for each one
/// ([`FreshBuffers`](crate::FreshBuffers)).
///
/// # Lifecycle
///
/// Every copy notifies its listener in the fixed order
/// `Started`, `Progress`*, `Succeeded` or `Failed`, `Finished`, and returns
/// the buffer to the strategy after the final notification, whatever the
/// outcome.
#[derive(Debug, Default)]
pub struct TextFetcher<S = ReusedBuffer> {
    strategy: S,
}

impl TextFetcher<ReusedBuffer> {
    /// Creates a fetcher with a reused buffer of the default size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategy: ReusedBuffer::new(),
        }
    }

    /// Creates a fetcher with a reused buffer of `size` characters.
    ///
    /// A size of zero substitutes
    /// [`DEFAULT_BUFFER_SIZE`](crate::DEFAULT_BUFFER_SIZE).
    #[must_use]
    pub fn with_buffer_size(size: usize) -> Self {
        Self {
            strategy: ReusedBuffer::with_size(size),
        }
    }
}

impl<S: BufferStrategy> TextFetcher<S> {
    /// Creates a fetcher over an arbitrary buffer strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Consumes the fetcher, returning its buffer strategy.
    #[must_use]
    pub fn into_strategy(self) -> S {
        self.strategy
    }

    /// Copies every character from `source` to `sink`.
    ///
    /// An absent source is treated as already exhausted; an absent sink
    /// discards the characters while the source is still drained; an absent
    /// listener is ignored. Characters arrive in the sink in source order,
    /// and the returned total is the number of characters written.
    ///
    /// Any read, write, or flush failure aborts the copy and surfaces as a
    /// [`FetchError`] carrying the running total. Afterwards, endpoints are
    /// closed according to `options`, success or failure; close failures
    /// are discarded so they cannot mask the copy's outcome.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            skip_all,
            fields(close_source = options.close_source, close_sink = options.close_sink)
        )
    )]
    pub fn copy(
        &mut self,
        source: Option<&mut dyn TextSource>,
        sink: Option<&mut dyn TextSink>,
        listener: Option<&mut dyn FetchListener>,
        options: CopyOptions,
    ) -> Result<u64> {
        let mut absent_source = EmptySource;
        let mut absent_sink = NullSink;
        let mut absent_listener = IdleListener;
        let source = source.unwrap_or(&mut absent_source);
        let sink = sink.unwrap_or(&mut absent_sink);
        let listener = listener.unwrap_or(&mut absent_listener);

        let outcome = self.run(source, sink, listener);

        if options.close_source {
            discard_close_failure("source", source.close());
        }
        if options.close_sink {
            discard_close_failure("sink", sink.close());
        }

        outcome
    }

    /// Fetches the entire content of `source` into a fresh character block.
    ///
    /// An absent source yields an empty block. When `close_source` is set
    /// the source is closed afterwards, success or failure, with any close
    /// failure discarded.
    pub fn fetch(
        &mut self,
        source: Option<&mut dyn TextSource>,
        listener: Option<&mut dyn FetchListener>,
        close_source: bool,
    ) -> Result<Vec<char>> {
        let mut collected: Vec<char> = Vec::new();
        let options = CopyOptions::new()
            .close_source(close_source)
            .close_sink(true);
        self.copy(source, Some(&mut collected), listener, options)?;
        Ok(collected)
    }

    /// Fetches the entire content of `source` as a `String`.
    ///
    /// Behaves exactly like [`fetch`](TextFetcher::fetch) with the result
    /// collected into owned text.
    pub fn read(
        &mut self,
        source: Option<&mut dyn TextSource>,
        listener: Option<&mut dyn FetchListener>,
        close_source: bool,
    ) -> Result<String> {
        let mut collected = String::new();
        let options = CopyOptions::new()
            .close_source(close_source)
            .close_sink(true);
        self.copy(source, Some(&mut collected), listener, options)?;
        Ok(collected)
    }

    fn run(
        &mut self,
        source: &mut dyn TextSource,
        sink: &mut dyn TextSink,
        listener: &mut dyn FetchListener,
    ) -> Result<u64> {
        let mut lease = BufferLease::obtain(&mut self.strategy);
        listener.on_event(FetchEvent::Started);

        let outcome = match copy_chunks(source, sink, listener, lease.slice()) {
            Ok(fetched) => {
                listener.on_event(FetchEvent::Succeeded { fetched });
                Ok(fetched)
            }
            Err((cause, fetched)) => {
                let error = FetchError::new(fetched, cause);
                listener.on_event(FetchEvent::Failed {
                    error: &error,
                    fetched,
                });
                Err(error)
            }
        };

        // The lease hands the buffer back on drop, after this notification,
        // even if the listener panics here.
        listener.on_event(FetchEvent::Finished);
        outcome
    }
}

/// Runs the read/write cycle until the source reports end-of-data.
///
/// On failure returns the underlying cause together with the running total
/// at the point the failure struck; a chunk whose read completed is counted
/// before its write is attempted.
fn copy_chunks(
    source: &mut dyn TextSource,
    sink: &mut dyn TextSink,
    listener: &mut dyn FetchListener,
    buffer: &mut [char],
) -> std::result::Result<u64, (io::Error, u64)> {
    let mut fetched: u64 = 0;
    loop {
        let count = source.read(buffer).map_err(|cause| (cause, fetched))?;
        if count == 0 {
            break;
        }
        fetched += count as u64;
        sink.write(&buffer[..count]).map_err(|cause| (cause, fetched))?;
        #[cfg(feature = "tracing")]
        trace!(count, fetched, "chunk copied");
        listener.on_event(FetchEvent::Progress { fetched });
    }
    sink.flush().map_err(|cause| (cause, fetched))?;
    listener.on_event(FetchEvent::Progress { fetched });
    Ok(fetched)
}

/// Close failures are swallowed so they cannot mask the copy's outcome.
fn discard_close_failure(endpoint: &str, result: io::Result<()>) {
    if let Err(error) = result {
        #[cfg(feature = "tracing")]
        debug!(endpoint, error = %error, "discarding close failure");
        #[cfg(not(feature = "tracing"))]
        let _ = (endpoint, error);
    }
}

/// Checks a buffer out of a strategy and guarantees its return.
///
/// The buffer travels back to the strategy in `drop`, so the return cannot
/// be skipped by early exits or a panicking listener.
struct BufferLease<'a, S: BufferStrategy> {
    strategy: &'a mut S,
    buffer: Option<Box<[char]>>,
}

impl<'a, S: BufferStrategy> BufferLease<'a, S> {
    fn obtain(strategy: &'a mut S) -> Self {
        let buffer = strategy.obtain();
        Self {
            strategy,
            buffer: Some(buffer),
        }
    }

    fn slice(&mut self) -> &mut [char] {
        self.buffer.as_deref_mut().expect("buffer already recycled")
    }
}

impl<S: BufferStrategy> Drop for BufferLease<'_, S> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.strategy.recycle(buffer);
        }
    }
}
