//! The `map` adapter.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Outcome, Pull, PullResult, Step};

/// Applies a callback to each upstream element, with its element index.
///
/// The index counts emitted elements, starting at 0. A deferred callback
/// outcome is stashed across the sync→async switch so it is applied exactly
/// once per element.
pub struct Map<S, F, U> {
    upstream: S,
    callback: F,
    index: usize,
    pending: Option<BoxFuture<'static, Result<U, SequenceError>>>,
    released: bool,
    faulted: bool,
}

impl<S, F, U> Map<S, F, U> {
    pub(crate) fn new(upstream: S, callback: F) -> Self {
        Self {
            upstream,
            callback,
            index: 0,
            pending: None,
            released: false,
            faulted: false,
        }
    }
}

impl<S, F, U> Source for Map<S, F, U>
where
    S: Source,
    F: FnMut(S::Item, usize) -> Outcome<U> + Send,
    U: Send + 'static,
{
    type Item = U;

    fn try_pull(&mut self) -> Pull<U> {
        if self.released {
            return Pull::Ready(Ok(Step::Done));
        }
        if self.pending.is_some() {
            return Pull::Suspended;
        }
        match self.upstream.try_pull() {
            Pull::Ready(Ok(Step::Value(value))) => {
                let index = self.index;
                self.index += 1;
                match (self.callback)(value, index) {
                    Outcome::Ready(Ok(mapped)) => Pull::Ready(Ok(Step::Value(mapped))),
                    Outcome::Ready(Err(error)) => {
                        self.fail(&error);
                        Pull::Ready(Err(error))
                    }
                    Outcome::Deferred(future) => {
                        self.pending = Some(future);
                        Pull::Suspended
                    }
                }
            }
            Pull::Ready(Ok(Step::Done)) => Pull::Ready(Ok(Step::Done)),
            Pull::Ready(Err(error)) => Pull::Ready(Err(error)),
            Pull::Suspended => Pull::Suspended,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<U>> {
        Box::pin(async move {
            if self.released {
                return Ok(Step::Done);
            }
            if let Some(future) = self.pending.take() {
                return match future.await {
                    Ok(mapped) => Ok(Step::Value(mapped)),
                    Err(error) => {
                        self.fail(&error);
                        Err(error)
                    }
                };
            }
            match self.upstream.pull().await? {
                Step::Done => Ok(Step::Done),
                Step::Value(value) => {
                    let index = self.index;
                    self.index += 1;
                    match (self.callback)(value, index).await {
                        Ok(mapped) => Ok(Step::Value(mapped)),
                        Err(error) => {
                            self.fail(&error);
                            Err(error)
                        }
                    }
                }
            }
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.upstream.release();
        }
    }

    fn fail(&mut self, error: &SequenceError) {
        if !self.faulted {
            self.faulted = true;
            self.upstream.fail(error);
        }
    }
}
