#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Buffered character fetching between readable sources and writable sinks.
//!
//! The crate wraps the boilerplate buffered-copy loop: characters are read
//! from a [`TextSource`] into a fixed-size buffer and written to a
//! [`TextSink`] chunk by chunk until the source is exhausted, with a running
//! total, optional lifecycle notifications, and optional closing of either
//! endpoint afterwards.
//!
//! # Quick start
//!
//! ```
//! use textfetch::{StrSource, TextFetcher};
//!
//! let mut fetcher = TextFetcher::new();
//! let mut source = StrSource::new("0123456789");
//! let text = fetcher.read(Some(&mut source), None, false)?;
//! assert_eq!(text, "0123456789");
//! # Ok::<(), textfetch::FetchError>(())
//! ```
//!
//! # Copying between endpoints
//!
//! [`TextFetcher::copy`] drives any source into any sink. Absent endpoints
//! are handled gracefully: a missing source reads as already exhausted, a
//! missing sink discards while the source is still drained. The
//! [`CopyOptions`] flags request closing either endpoint afterwards; close
//! failures are discarded so they never mask the copy's outcome.
//!
//! ```
//! use textfetch::{CopyOptions, StrSource, TextFetcher};
//!
//! let mut fetcher = TextFetcher::new();
//! let mut source = StrSource::new("hello");
//! let mut collected = String::new();
//! let total = fetcher.copy(
//!     Some(&mut source),
//!     Some(&mut collected),
//!     None,
//!     CopyOptions::default(),
//! )?;
//! assert_eq!(total, 5);
//! assert_eq!(collected, "hello");
//! # Ok::<(), textfetch::FetchError>(())
//! ```
//!
//! # Progress notifications
//!
//! A [`FetchListener`] (any `FnMut(FetchEvent)` closure qualifies) observes
//! the lifecycle of a copy: `Started`, a `Progress` event per chunk, then
//! `Succeeded` or `Failed`, then `Finished`, always in that order and with
//! `Finished` delivered exactly once.
//!
//! # Buffer strategies
//!
//! The transfer buffer comes from a [`BufferStrategy`]. [`ReusedBuffer`]
//! (the default) allocates once and scrubs the buffer with `'\0'` between
//! copies; [`FreshBuffers`] allocates per copy and keeps no state. Both
//! substitute [`DEFAULT_BUFFER_SIZE`] when constructed with a size of zero.
//!
//! # Feature flags
//!
//! - `tracing` - instruments copy operations and logs discarded close
//!   failures via the `tracing` crate.

mod buffer;
mod error;
mod event;
mod fetcher;
mod sink;
mod source;

pub use crate::buffer::{BufferStrategy, DEFAULT_BUFFER_SIZE, FreshBuffers, ReusedBuffer};
pub use crate::error::{FetchError, Result};
pub use crate::event::{FetchEvent, FetchListener, IdleListener};
pub use crate::fetcher::{CopyOptions, TextFetcher};
pub use crate::sink::{FmtSink, NullSink, TextSink, Utf8Sink};
pub use crate::source::{EmptySource, IterSource, StrSource, TextSource, Utf8Source};
