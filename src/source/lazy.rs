//! A source produced on demand from a zero-argument closure.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::{IntoSource, Source};
use crate::step::{Pull, PullResult, Step};

/// A source that invokes a producer closure once, on first pull.
///
/// This is the resolver's lazy-producer case: the closure stands for a
/// restartable recipe, and invoking it yields the one-shot handle that the
/// sequence then drains. Construction defers the invocation, so building a
/// pipeline over a `LazySource` touches nothing until it is driven.
///
/// # Examples
///
/// ```rust
/// use pullars::Sequence;
///
/// let sequence = Sequence::from_fn(|| Sequence::new(vec![1, 2, 3]));
/// let collected = sequence.to_vec().into_ready().unwrap().unwrap();
/// assert_eq!(collected, vec![1, 2, 3]);
/// ```
pub struct LazySource<F, I>
where
    I: IntoSource,
{
    thunk: Option<F>,
    source: Option<I::Source>,
}

impl<F, I> LazySource<F, I>
where
    F: FnOnce() -> I,
    I: IntoSource,
{
    /// Wraps a producer closure as a pull source.
    pub fn new(thunk: F) -> Self {
        Self {
            thunk: Some(thunk),
            source: None,
        }
    }

    fn activate(&mut self) {
        if let Some(thunk) = self.thunk.take() {
            self.source = Some(thunk().into_source());
        }
    }
}

impl<F, I> Source for LazySource<F, I>
where
    F: FnOnce() -> I + Send,
    I: IntoSource,
{
    type Item = I::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        self.activate();
        match self.source.as_mut() {
            Some(source) => source.try_pull(),
            None => Pull::Ready(Ok(Step::Done)),
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            self.activate();
            match self.source.as_mut() {
                Some(source) => source.pull().await,
                None => Ok(Step::Done),
            }
        })
    }

    fn release(&mut self) {
        // A producer that was never invoked has nothing to clean up.
        self.thunk = None;
        if let Some(source) = self.source.as_mut() {
            source.release();
        }
    }

    fn fail(&mut self, error: &SequenceError) {
        self.thunk = None;
        if let Some(source) = self.source.as_mut() {
            source.fail(error);
        }
    }
}
