//! The single error kind surfaced by fetch operations.
//!
//! Read, write, and flush failures are wrapped uniformly into [`FetchError`],
//! which records how many characters had been copied when the underlying
//! failure struck. Failures raised while closing an endpoint afterwards are
//! never wrapped; the copy layer discards them so they cannot mask the
//! primary outcome.

use std::io;

use thiserror::Error;

/// Convenience alias for results produced by fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// An I/O failure that aborted a copy operation.
///
/// Carries the underlying cause and the running character total at the point
/// the failure struck. There are no distinct kinds for read, write, or flush
/// failures; callers that care can inspect [`cause`](FetchError::cause).
#[derive(Debug, Error)]
#[error("fetch failed after {fetched} {} been copied successfully", unit(.fetched))]
pub struct FetchError {
    fetched: u64,
    #[source]
    cause: io::Error,
}

impl FetchError {
    /// Wraps an I/O failure that struck after `fetched` characters.
    #[must_use]
    pub fn new(fetched: u64, cause: io::Error) -> Self {
        Self { fetched, cause }
    }

    /// Number of characters copied successfully before the failure.
    #[must_use]
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Borrows the underlying I/O failure.
    #[must_use]
    pub fn cause(&self) -> &io::Error {
        &self.cause
    }

    /// Consumes the error, returning the underlying I/O failure.
    #[must_use]
    pub fn into_cause(self) -> io::Error {
        self.cause
    }
}

fn unit(fetched: &u64) -> &'static str {
    if *fetched == 1 { "char has" } else { "chars have" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn cause() -> io::Error {
        io::Error::other("underlying failure")
    }

    #[test]
    fn display_pluralizes_zero() {
        let error = FetchError::new(0, cause());
        assert_eq!(
            error.to_string(),
            "fetch failed after 0 chars have been copied successfully"
        );
    }

    #[test]
    fn display_singular_for_one() {
        let error = FetchError::new(1, cause());
        assert_eq!(
            error.to_string(),
            "fetch failed after 1 char has been copied successfully"
        );
    }

    #[test]
    fn display_pluralizes_many() {
        let error = FetchError::new(42, cause());
        assert_eq!(
            error.to_string(),
            "fetch failed after 42 chars have been copied successfully"
        );
    }

    #[test]
    fn exposes_count_and_cause() {
        let error = FetchError::new(7, cause());
        assert_eq!(error.fetched(), 7);
        assert_eq!(error.cause().to_string(), "underlying failure");
        assert!(error.source().is_some());
    }

    #[test]
    fn into_cause_unwraps() {
        let error = FetchError::new(3, io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert_eq!(error.into_cause().kind(), io::ErrorKind::TimedOut);
    }
}
