//! The wrapper transform: the per-element conversion attached at
//! construction time.
//!
//! Fusing the transform into the chain as its own adapter is what makes the
//! exactly-once guarantee structural: every combinator downstream reads
//! through this link, so no composition can apply the transform twice.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Outcome, Pull, PullResult, Step};

/// Applies the sequence's transform to each raw upstream element.
pub struct Transform<S, F, T> {
    upstream: S,
    transform: F,
    pending: Option<BoxFuture<'static, Result<T, SequenceError>>>,
    released: bool,
    faulted: bool,
}

impl<S, F, T> Transform<S, F, T> {
    pub(crate) fn new(upstream: S, transform: F) -> Self {
        Self {
            upstream,
            transform,
            pending: None,
            released: false,
            faulted: false,
        }
    }
}

impl<S, F, T> Source for Transform<S, F, T>
where
    S: Source,
    F: FnMut(S::Item) -> Outcome<T> + Send,
    T: Send + 'static,
{
    type Item = T;

    fn try_pull(&mut self) -> Pull<T> {
        if self.released {
            return Pull::Ready(Ok(Step::Done));
        }
        if self.pending.is_some() {
            return Pull::Suspended;
        }
        match self.upstream.try_pull() {
            Pull::Ready(Ok(Step::Value(raw))) => match (self.transform)(raw) {
                Outcome::Ready(Ok(value)) => Pull::Ready(Ok(Step::Value(value))),
                Outcome::Ready(Err(error)) => {
                    self.fail(&error);
                    Pull::Ready(Err(error))
                }
                Outcome::Deferred(future) => {
                    self.pending = Some(future);
                    Pull::Suspended
                }
            },
            Pull::Ready(Ok(Step::Done)) => Pull::Ready(Ok(Step::Done)),
            Pull::Ready(Err(error)) => Pull::Ready(Err(error)),
            Pull::Suspended => Pull::Suspended,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<T>> {
        Box::pin(async move {
            if self.released {
                return Ok(Step::Done);
            }
            if let Some(future) = self.pending.take() {
                return match future.await {
                    Ok(value) => Ok(Step::Value(value)),
                    Err(error) => {
                        self.fail(&error);
                        Err(error)
                    }
                };
            }
            match self.upstream.pull().await? {
                Step::Done => Ok(Step::Done),
                Step::Value(raw) => match (self.transform)(raw).await {
                    Ok(value) => Ok(Step::Value(value)),
                    Err(error) => {
                        self.fail(&error);
                        Err(error)
                    }
                },
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
