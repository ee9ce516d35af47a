//! Lifecycle notifications emitted while a copy runs.

use crate::error::FetchError;

/// A lifecycle event of one copy operation.
///
/// Events are dispatched synchronously, inline in the copy loop. Per
/// operation they follow the fixed order [`Started`](FetchEvent::Started),
/// any number of [`Progress`](FetchEvent::Progress), then
/// [`Succeeded`](FetchEvent::Succeeded) or [`Failed`](FetchEvent::Failed),
/// then [`Finished`](FetchEvent::Finished). `Finished` is delivered exactly
/// once regardless of outcome.
#[derive(Debug, Clone, Copy)]
pub enum FetchEvent<'a> {
    /// The copy is about to read its first chunk.
    Started,
    /// A chunk was written, or the sink was flushed after the last chunk.
    Progress {
        /// Characters copied so far.
        fetched: u64,
    },
    /// The source was drained and the sink flushed.
    Succeeded {
        /// Final character total.
        fetched: u64,
    },
    /// The copy was aborted by an I/O failure.
    Failed {
        /// The wrapped failure about to be returned to the caller.
        error: &'a FetchError,
        /// Characters copied before the failure.
        fetched: u64,
    },
    /// Terminal notification, after `Succeeded` or `Failed`.
    Finished,
}

/// Callback sink for [`FetchEvent`]s.
///
/// Listeners run on the copying thread; a slow listener stalls the copy.
/// The copy layer does not retain the listener beyond one call.
pub trait FetchListener {
    /// Receives the next lifecycle event.
    fn on_event(&mut self, event: FetchEvent<'_>);
}

impl<F> FetchListener for F
where
    F: FnMut(FetchEvent<'_>),
{
    fn on_event(&mut self, event: FetchEvent<'_>) {
        self(event);
    }
}

/// A listener that ignores every event.
///
/// Substituted by the copy layer when the caller passes no listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleListener;

impl FetchListener for IdleListener {
    fn on_event(&mut self, _event: FetchEvent<'_>) {}
}
