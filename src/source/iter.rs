//! Iterator-backed leaf sources.
//!
//! These sources never suspend: their synchronous attempt always answers
//! [`Pull::Ready`], and the asynchronous continuation resolves immediately.
//! They are the canonical "already synchronous" end of the dual-mode engine.

use std::marker::PhantomData;

use futures::future;
use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

/// A source over any [`Iterator`].
///
/// The iterator is dropped on exhaustion or release; afterwards the source
/// keeps reporting done.
///
/// # Examples
///
/// ```rust
/// use pullars::Sequence;
///
/// let doubled = Sequence::from_iter((1..=3).map(|x| x * 10))
///     .to_vec()
///     .into_ready()
///     .unwrap()
///     .unwrap();
/// assert_eq!(doubled, vec![10, 20, 30]);
/// ```
pub struct IterSource<I> {
    iter: Option<I>,
}

impl<I> IterSource<I>
where
    I: Iterator,
{
    /// Wraps an iterator as a pull source.
    pub fn new(iter: I) -> Self {
        Self { iter: Some(iter) }
    }

    fn next_step(&mut self) -> PullResult<I::Item> {
        match self.iter.as_mut().and_then(Iterator::next) {
            Some(value) => Ok(Step::Value(value)),
            None => {
                self.iter = None;
                Ok(Step::Done)
            }
        }
    }
}

impl<I> Source for IterSource<I>
where
    I: Iterator + Send,
    I::Item: Send + 'static,
{
    type Item = I::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        Pull::Ready(self.next_step())
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        let step = self.next_step();
        Box::pin(future::ready(step))
    }

    fn release(&mut self) {
        self.iter = None;
    }

    fn fail(&mut self, _error: &SequenceError) {}
}

/// A source over an iterator of fallible pulls.
///
/// An `Err` element surfaces as a failed pull; the iterator is kept, so a
/// downstream [`map_error`](crate::Sequence::map_error) can convert the
/// failure and continue with the remaining elements.
pub struct TryIterSource<I> {
    iter: Option<I>,
}

impl<I, T> TryIterSource<I>
where
    I: Iterator<Item = Result<T, SequenceError>>,
{
    /// Wraps an iterator of results as a pull source.
    pub fn new(iter: I) -> Self {
        Self { iter: Some(iter) }
    }

    fn next_step(&mut self) -> PullResult<T> {
        match self.iter.as_mut().and_then(Iterator::next) {
            Some(Ok(value)) => Ok(Step::Value(value)),
            Some(Err(error)) => Err(error),
            None => {
                self.iter = None;
                Ok(Step::Done)
            }
        }
    }
}

impl<I, T> Source for TryIterSource<I>
where
    I: Iterator<Item = Result<T, SequenceError>> + Send,
    T: Send + 'static,
{
    type Item = T;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        Pull::Ready(self.next_step())
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        let step = self.next_step();
        Box::pin(future::ready(step))
    }

    fn release(&mut self) {
        self.iter = None;
    }

    fn fail(&mut self, _error: &SequenceError) {}
}

/// A source that is exhausted from the start.
pub struct EmptySource<T> {
    marker: PhantomData<T>,
}

impl<T> EmptySource<T> {
    /// Builds an exhausted source.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for EmptySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Source for EmptySource<T>
where
    T: Send + 'static,
{
    type Item = T;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        Pull::Ready(Ok(Step::Done))
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(future::ready(Ok(Step::Done)))
    }

    fn release(&mut self) {}

    fn fail(&mut self, _error: &SequenceError) {}
}
