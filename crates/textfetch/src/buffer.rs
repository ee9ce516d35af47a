//! Buffer acquisition strategies for the copy loop.
//!
//! Every copy operation checks out exactly one fixed-size `char` buffer for
//! its duration and hands it back when done, success or failure. How that
//! buffer is provided is a strategy decision: [`ReusedBuffer`] keeps a
//! single allocation alive across copies and scrubs it between uses, while
//! [`FreshBuffers`] pays one allocation per copy and carries no state.

/// Default buffer size of 1024 characters.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Returns the requested size, substituting the default for zero.
fn size_or_default(size: usize) -> usize {
    if size == 0 { DEFAULT_BUFFER_SIZE } else { size }
}

fn allocate(size: usize) -> Box<[char]> {
    vec!['\0'; size].into_boxed_slice()
}

/// Supplies the copy loop with a transfer buffer and takes it back afterwards.
///
/// [`obtain`](BufferStrategy::obtain) and [`recycle`](BufferStrategy::recycle)
/// bracket every copy operation exactly once, in that order. Every buffer
/// handed out by `obtain` comes back through `recycle`, even when the copy
/// fails.
pub trait BufferStrategy {
    /// Hands out a fixed-size buffer for one copy operation.
    fn obtain(&mut self) -> Box<[char]>;

    /// Takes back a buffer previously handed out by
    /// [`obtain`](BufferStrategy::obtain).
    fn recycle(&mut self, buffer: Box<[char]>);
}

/// Reuses one eagerly-allocated buffer across copy operations.
///
/// On recycle every slot is overwritten with `'\0'`, so text from a
/// finished copy does not linger in memory until the next one.
///
/// The single allocation means a fetcher built on this strategy cannot
/// serve two copies at once; the `&mut` receivers enforce that exclusive
/// checkout statically. Use [`FreshBuffers`] where that restriction hurts.
#[derive(Debug)]
pub struct ReusedBuffer {
    buffer: Option<Box<[char]>>,
    size: usize,
}

impl ReusedBuffer {
    /// Creates the strategy with a buffer of [`DEFAULT_BUFFER_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_BUFFER_SIZE)
    }

    /// Creates the strategy with a buffer of `size` characters.
    ///
    /// A size of zero substitutes [`DEFAULT_BUFFER_SIZE`].
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        let size = size_or_default(size);
        Self {
            buffer: Some(allocate(size)),
            size,
        }
    }

    /// Size of the managed buffer in characters.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for ReusedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferStrategy for ReusedBuffer {
    fn obtain(&mut self) -> Box<[char]> {
        self.buffer.take().unwrap_or_else(|| allocate(self.size))
    }

    fn recycle(&mut self, mut buffer: Box<[char]>) {
        // Scrub before the buffer becomes reachable again.
        buffer.fill('\0');
        self.buffer = Some(buffer);
    }
}

/// Allocates a fresh buffer for every copy operation.
///
/// Keeps no state between copies, so fetchers built on this strategy have no
/// sharing restriction beyond the usual `&mut` exclusivity of a single call.
/// Trades one allocation per copy for that freedom.
#[derive(Debug, Clone, Copy)]
pub struct FreshBuffers {
    size: usize,
}

impl FreshBuffers {
    /// Creates the strategy with [`DEFAULT_BUFFER_SIZE`] buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_BUFFER_SIZE)
    }

    /// Creates the strategy with buffers of `size` characters.
    ///
    /// A size of zero substitutes [`DEFAULT_BUFFER_SIZE`].
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            size: size_or_default(size),
        }
    }

    /// Size of the buffers handed out, in characters.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for FreshBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferStrategy for FreshBuffers {
    fn obtain(&mut self) -> Box<[char]> {
        allocate(self.size)
    }

    fn recycle(&mut self, _buffer: Box<[char]>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_size_is_1024() {
        assert_eq!(ReusedBuffer::new().size(), 1024);
        assert_eq!(FreshBuffers::new().size(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn zero_size_substitutes_default() {
        assert_eq!(ReusedBuffer::with_size(0).size(), DEFAULT_BUFFER_SIZE);
        assert_eq!(FreshBuffers::with_size(0).size(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn custom_size_is_respected() {
        let mut strategy = ReusedBuffer::with_size(7);
        assert_eq!(strategy.size(), 7);
        assert_eq!(strategy.obtain().len(), 7);
    }

    #[test]
    fn reused_buffer_is_zeroed_between_uses() {
        let mut strategy = ReusedBuffer::with_size(8);

        let mut buffer = strategy.obtain();
        buffer.fill('x');
        strategy.recycle(buffer);

        let buffer = strategy.obtain();
        assert!(buffer.iter().all(|&c| c == '\0'));
    }

    #[test]
    fn reused_buffer_survives_missing_checkout() {
        // A second obtain without an intervening recycle falls back to a
        // fresh allocation instead of panicking.
        let mut strategy = ReusedBuffer::with_size(4);
        let first = strategy.obtain();
        let second = strategy.obtain();
        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn fresh_buffers_allocate_per_obtain() {
        let mut strategy = FreshBuffers::with_size(4);

        let mut buffer = strategy.obtain();
        buffer.fill('y');
        strategy.recycle(buffer);

        let buffer = strategy.obtain();
        assert!(buffer.iter().all(|&c| c == '\0'));
        assert_eq!(buffer.len(), 4);
    }
}
