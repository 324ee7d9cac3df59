//! The `map_error` adapter.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Outcome, Pull, PullResult, Step};

/// Converts failed pulls into emitted elements.
///
/// A failure caught here does not end the sequence: the converted value is
/// emitted in the failed element's place and the next pull proceeds
/// normally. Only a failure raised by the handler itself propagates —
/// errors are recovered at most once.
pub struct MapError<S, F>
where
    S: Source,
{
    upstream: S,
    handler: F,
    pending: Option<BoxFuture<'static, Result<S::Item, SequenceError>>>,
    released: bool,
    faulted: bool,
}

impl<S, F> MapError<S, F>
where
    S: Source,
{
    pub(crate) fn new(upstream: S, handler: F) -> Self {
        Self {
            upstream,
            handler,
            pending: None,
            released: false,
            faulted: false,
        }
    }
}

impl<S, F> Source for MapError<S, F>
where
    S: Source,
    F: FnMut(SequenceError) -> Outcome<S::Item> + Send,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        if self.released {
            return Pull::Ready(Ok(Step::Done));
        }
        if self.pending.is_some() {
            return Pull::Suspended;
        }
        match self.upstream.try_pull() {
            Pull::Ready(Err(error)) => match (self.handler)(error) {
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
            other => other,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
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
            match self.upstream.pull().await {
                Ok(step) => Ok(step),
                Err(error) => match (self.handler)(error).await {
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
