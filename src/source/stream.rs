//! Stream-backed leaf sources.
//!
//! A [`futures::Stream`] is the asynchronous end of the dual-mode engine,
//! but it is not *assumed* asynchronous: the synchronous attempt probes the
//! stream once with a no-op waker, so a stream that polls ready (such as
//! [`futures::stream::iter`]) keeps the whole chain on the synchronous path.
//! Only a genuinely pending poll suspends the chain; the asynchronous
//! continuation then re-polls with the caller's real waker.

use std::task::{Context, Poll};

use futures::Stream;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::task;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

/// A source over any [`Stream`].
///
/// # Examples
///
/// ```rust
/// use pullars::Sequence;
///
/// // A ready-polling stream never leaves the synchronous path.
/// let outcome = Sequence::from_stream(futures::stream::iter([1, 2, 3])).to_vec();
/// assert_eq!(outcome.into_ready().unwrap().unwrap(), vec![1, 2, 3]);
/// ```
pub struct StreamSource<St> {
    stream: Option<std::pin::Pin<Box<St>>>,
}

impl<St> StreamSource<St>
where
    St: Stream,
{
    /// Wraps a stream as a pull source.
    pub fn new(stream: St) -> Self {
        Self {
            stream: Some(Box::pin(stream)),
        }
    }
}

impl<St> Source for StreamSource<St>
where
    St: Stream + Send,
    St::Item: Send + 'static,
{
    type Item = St::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        let Some(stream) = self.stream.as_mut() else {
            return Pull::Ready(Ok(Step::Done));
        };
        // Probe with a no-op waker; a pending poll is re-driven with the
        // caller's waker from pull().
        let waker = task::noop_waker();
        let mut context = Context::from_waker(&waker);
        match stream.as_mut().poll_next(&mut context) {
            Poll::Ready(Some(value)) => Pull::Ready(Ok(Step::Value(value))),
            Poll::Ready(None) => {
                self.stream = None;
                Pull::Ready(Ok(Step::Done))
            }
            Poll::Pending => Pull::Suspended,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            let Some(stream) = self.stream.as_mut() else {
                return Ok(Step::Done);
            };
            match stream.next().await {
                Some(value) => Ok(Step::Value(value)),
                None => {
                    self.stream = None;
                    Ok(Step::Done)
                }
            }
        })
    }

    fn release(&mut self) {
        self.stream = None;
    }

    fn fail(&mut self, _error: &SequenceError) {}
}

/// A source over a stream of fallible pulls.
///
/// An `Err` element surfaces as a failed pull; the stream is kept, so a
/// downstream [`map_error`](crate::Sequence::map_error) can convert the
/// failure and continue with the remaining elements.
pub struct TryStreamSource<St> {
    stream: Option<std::pin::Pin<Box<St>>>,
}

impl<St, T> TryStreamSource<St>
where
    St: Stream<Item = Result<T, SequenceError>>,
{
    /// Wraps a stream of results as a pull source.
    pub fn new(stream: St) -> Self {
        Self {
            stream: Some(Box::pin(stream)),
        }
    }
}

impl<St, T> Source for TryStreamSource<St>
where
    St: Stream<Item = Result<T, SequenceError>> + Send,
    T: Send + 'static,
{
    type Item = T;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        let Some(stream) = self.stream.as_mut() else {
            return Pull::Ready(Ok(Step::Done));
        };
        let waker = task::noop_waker();
        let mut context = Context::from_waker(&waker);
        match stream.as_mut().poll_next(&mut context) {
            Poll::Ready(Some(Ok(value))) => Pull::Ready(Ok(Step::Value(value))),
            Poll::Ready(Some(Err(error))) => Pull::Ready(Err(error)),
            Poll::Ready(None) => {
                self.stream = None;
                Pull::Ready(Ok(Step::Done))
            }
            Poll::Pending => Pull::Suspended,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            let Some(stream) = self.stream.as_mut() else {
                return Ok(Step::Done);
            };
            match stream.next().await {
                Some(Ok(value)) => Ok(Step::Value(value)),
                Some(Err(error)) => Err(error),
                None => {
                    self.stream = None;
                    Ok(Step::Done)
                }
            }
        })
    }

    fn release(&mut self) {
        self.stream = None;
    }

    fn fail(&mut self, _error: &SequenceError) {}
}
