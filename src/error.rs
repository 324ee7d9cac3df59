//! Error types for sequence pipelines.
//!
//! This module provides the [`SequenceError`] type shared by every source,
//! combinator, and terminal operation in the crate. Errors are ordinary
//! values: a failed pull surfaces as `Err(SequenceError)` while the chain is
//! synchronous, and as the rejection of a deferred outcome once the chain
//! has switched to asynchronous mode.
//!
//! # Examples
//!
//! ```rust
//! use pullars::SequenceError;
//!
//! let error = SequenceError::EmptyReduce;
//! assert_eq!(
//!     format!("{error}"),
//!     "Reduce of empty iterable with no initial value"
//! );
//! ```

use std::sync::Arc;

/// An error raised while driving a sequence.
///
/// `SequenceError` is `Clone` so that a caught error can be re-emitted as an
/// ordinary element by [`Sequence::map_error`](crate::Sequence::map_error);
/// user payloads are shared behind an `Arc` for that reason.
#[derive(Debug, Clone)]
pub enum SequenceError {
    /// A value could not be resolved into a pull source.
    NotIterable,
    /// A seedless reduce was driven over an empty sequence.
    EmptyReduce,
    /// A synchronous enumeration reached an asynchronous boundary.
    ///
    /// Raised only by the synchronous entry point
    /// ([`Sequence::iter`](crate::Sequence::iter)); the terminal operations
    /// switch to a deferred outcome instead of failing.
    Suspended,
    /// A failure raised by a user callback, transform, or custom source.
    Custom(Arc<dyn std::error::Error + Send + Sync>),
}

impl SequenceError {
    /// Wraps an arbitrary error as a sequence failure.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::SequenceError;
    ///
    /// let error = SequenceError::custom(std::io::Error::other("boom"));
    /// assert_eq!(format!("{error}"), "boom");
    /// ```
    pub fn custom<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(error))
    }

    /// Builds a sequence failure from a bare message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::SequenceError;
    ///
    /// let error = SequenceError::message("upstream unavailable");
    /// assert_eq!(format!("{error}"), "upstream unavailable");
    /// ```
    pub fn message(text: impl Into<String>) -> Self {
        Self::Custom(Arc::new(MessageError(text.into())))
    }
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotIterable => write!(formatter, "Argument is not iterable"),
            Self::EmptyReduce => {
                write!(formatter, "Reduce of empty iterable with no initial value")
            }
            Self::Suspended => {
                write!(formatter, "sequence suspended during synchronous iteration")
            }
            Self::Custom(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for SequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Custom(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// A message-only error payload.
#[derive(Debug)]
struct MessageError(String);

impl std::fmt::Display for MessageError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl std::error::Error for MessageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_iterable_display() {
        assert_eq!(
            format!("{}", SequenceError::NotIterable),
            "Argument is not iterable"
        );
    }

    #[test]
    fn test_empty_reduce_display() {
        assert_eq!(
            format!("{}", SequenceError::EmptyReduce),
            "Reduce of empty iterable with no initial value"
        );
    }

    #[test]
    fn test_suspended_display() {
        assert_eq!(
            format!("{}", SequenceError::Suspended),
            "sequence suspended during synchronous iteration"
        );
    }

    #[test]
    fn test_custom_error_preserves_source() {
        let error = SequenceError::custom(std::io::Error::other("disk gone"));
        assert_eq!(format!("{error}"), "disk gone");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_clone_shares_payload() {
        let error = SequenceError::message("shared");
        let cloned = error.clone();
        assert_eq!(format!("{error}"), format!("{cloned}"));
    }
}
