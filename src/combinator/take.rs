//! The `take` adapter.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

/// Emits at most `limit` upstream elements.
///
/// The budget is checked before pulling: once it is spent, the adapter
/// releases its upstream exactly once and reports done without requesting
/// anything further. Natural upstream exhaustion inside the budget releases
/// nothing.
pub struct Take<S> {
    upstream: S,
    limit: usize,
    count: usize,
    done: bool,
    released: bool,
    faulted: bool,
}

impl<S> Take<S> {
    pub(crate) fn new(upstream: S, limit: usize) -> Self {
        Self {
            upstream,
            limit,
            count: 0,
            done: false,
            released: false,
            faulted: false,
        }
    }
}

impl<S> Source for Take<S>
where
    S: Source,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        if self.done {
            return Pull::Ready(Ok(Step::Done));
        }
        if self.count >= self.limit {
            self.done = true;
            self.release();
            return Pull::Ready(Ok(Step::Done));
        }
        match self.upstream.try_pull() {
            Pull::Ready(Ok(Step::Value(value))) => {
                self.count += 1;
                Pull::Ready(Ok(Step::Value(value)))
            }
            Pull::Ready(Ok(Step::Done)) => {
                self.done = true;
                Pull::Ready(Ok(Step::Done))
            }
            Pull::Ready(Err(error)) => Pull::Ready(Err(error)),
            Pull::Suspended => Pull::Suspended,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            if self.done {
                return Ok(Step::Done);
            }
            if self.count >= self.limit {
                self.done = true;
                self.release();
                return Ok(Step::Done);
            }
            match self.upstream.pull().await? {
                Step::Value(value) => {
                    self.count += 1;
                    Ok(Step::Value(value))
                }
                Step::Done => {
                    self.done = true;
                    Ok(Step::Done)
                }
            }
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.done = true;
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
