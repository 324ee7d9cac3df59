//! The tagged results exchanged by the dual-mode execution engine.
//!
//! Three unions carry every value in the crate:
//!
//! - [`Step`] is the universal unit passed between layers: one element, or
//!   exhaustion.
//! - [`Pull`] is the result of a *synchronous* pull attempt. A source that
//!   can make progress without suspending answers [`Pull::Ready`]; the
//!   instant it would have to wait it answers [`Pull::Suspended`], and the
//!   caller switches to the source's asynchronous continuation for the rest
//!   of the call.
//! - [`Outcome`] is the result of a whole operation or of a user callback:
//!   either a value available now, or a boxed future to be awaited. Once an
//!   operation has produced a deferred outcome it never reverts to the
//!   synchronous path within that call.
//!
//! # Examples
//!
//! ```rust
//! use pullars::Outcome;
//!
//! let ready = Outcome::ready(42);
//! assert!(ready.is_ready());
//!
//! let deferred = Outcome::defer(async { Ok(21 * 2) });
//! assert!(deferred.is_deferred());
//! let result = futures::executor::block_on(async { deferred.await });
//! assert_eq!(result.unwrap(), 42);
//! ```

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use pin_project_lite::pin_project;

use crate::error::SequenceError;

/// One result of a pull: an element, or exhaustion.
///
/// A source that has reported [`Step::Done`] keeps reporting it; exhaustion
/// is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The source produced another element.
    Value(T),
    /// The source is exhausted.
    Done,
}

/// The result of pulling one step from a source, or the failure that ended
/// the attempt.
pub type PullResult<T> = Result<Step<T>, SequenceError>;

/// The result of a synchronous pull attempt.
#[derive(Debug)]
pub enum Pull<T> {
    /// The step completed without suspending.
    Ready(PullResult<T>),
    /// The source reached an asynchronous boundary. The caller must continue
    /// this call through [`Source::pull`](crate::Source::pull); the source
    /// resumes exactly where the attempt left off.
    Suspended,
}

// =============================================================================
// Outcome
// =============================================================================

/// The result of an operation or callback: available now, or deferred.
///
/// Every eager operation on a [`Sequence`](crate::Sequence) returns an
/// `Outcome`, and every combinator callback produces one. A chain stays on
/// the synchronous path while all outcomes are [`Outcome::Ready`]; the first
/// [`Outcome::Deferred`] switches the remainder of the call to the
/// asynchronous continuation, and the call's own result becomes deferred.
///
/// `Outcome` implements [`IntoFuture`], so a deferred outcome is awaited
/// directly:
///
/// ```rust
/// use pullars::Sequence;
///
/// let outcome = Sequence::new(vec![1, 2, 3]).to_vec();
/// // An all-synchronous chain resolves without an executor.
/// assert_eq!(outcome.into_ready().unwrap().unwrap(), vec![1, 2, 3]);
/// ```
pub enum Outcome<T> {
    /// The operation finished on the synchronous path.
    Ready(Result<T, SequenceError>),
    /// The operation switched to an asynchronous continuation.
    Deferred(BoxFuture<'static, Result<T, SequenceError>>),
}

impl<T> Outcome<T> {
    /// Wraps a value available now.
    pub fn ready(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    /// Wraps a failure raised on the synchronous path.
    pub fn error(error: SequenceError) -> Self {
        Self::Ready(Err(error))
    }

    /// Wraps a future as a deferred outcome.
    ///
    /// # Arguments
    ///
    /// * `future` - The continuation producing the eventual result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::Outcome;
    ///
    /// let outcome: Outcome<i32> = Outcome::defer(async { Ok(7) });
    /// assert!(outcome.is_deferred());
    /// ```
    pub fn defer<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, SequenceError>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Returns `true` if the outcome resolved on the synchronous path.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns `true` if the outcome switched to an asynchronous continuation.
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Consumes the outcome, returning the synchronous result if there is one.
    ///
    /// Returns `None` for a deferred outcome; await it instead.
    pub fn into_ready(self) -> Option<Result<T, SequenceError>> {
        match self {
            Self::Ready(result) => Some(result),
            Self::Deferred(_) => None,
        }
    }
}

impl<T> From<Result<T, SequenceError>> for Outcome<T> {
    fn from(result: Result<T, SequenceError>) -> Self {
        Self::Ready(result)
    }
}

impl<T> std::fmt::Debug for Outcome<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(result) => formatter.debug_tuple("Ready").field(result).finish(),
            Self::Deferred(_) => formatter.write_str("Deferred(..)"),
        }
    }
}

pin_project! {
    /// The future obtained by awaiting an [`Outcome`].
    ///
    /// A ready outcome resolves on the first poll; a deferred outcome
    /// forwards polls to its boxed continuation.
    pub struct OutcomeFuture<T> {
        outcome: Option<Outcome<T>>,
    }
}

impl<T> Future for OutcomeFuture<T> {
    type Output = Result<T, SequenceError>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.outcome.take() {
            Some(Outcome::Ready(result)) => Poll::Ready(result),
            Some(Outcome::Deferred(mut future)) => match future.as_mut().poll(context) {
                Poll::Ready(result) => Poll::Ready(result),
                Poll::Pending => {
                    *this.outcome = Some(Outcome::Deferred(future));
                    Poll::Pending
                }
            },
            None => panic!("OutcomeFuture polled after completion"),
        }
    }
}

impl<T> IntoFuture for Outcome<T> {
    type Output = Result<T, SequenceError>;
    type IntoFuture = OutcomeFuture<T>;

    fn into_future(self) -> OutcomeFuture<T> {
        OutcomeFuture {
            outcome: Some(self),
        }
    }
}
