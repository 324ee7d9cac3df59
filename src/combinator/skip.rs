//! The `drop` operation's adapter.
//!
//! The struct is named `Skip` because `Drop` is claimed by `std::ops::Drop`;
//! the operation keeps its name on [`Sequence::drop`](crate::Sequence::drop).

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

/// Discards the first `count` upstream elements, then proxies pulls
/// unchanged.
///
/// The remaining-to-skip counter is adapter state, so a skip that suspends
/// midway resumes from the asynchronous continuation without re-discarding.
/// A zero count is the identity wrapper.
pub struct Skip<S> {
    upstream: S,
    remaining: usize,
    released: bool,
    faulted: bool,
}

impl<S> Skip<S> {
    pub(crate) fn new(upstream: S, count: usize) -> Self {
        Self {
            upstream,
            remaining: count,
            released: false,
            faulted: false,
        }
    }
}

impl<S> Source for Skip<S>
where
    S: Source,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        if self.released {
            return Pull::Ready(Ok(Step::Done));
        }
        while self.remaining > 0 {
            match self.upstream.try_pull() {
                Pull::Ready(Ok(Step::Value(_))) => self.remaining -= 1,
                Pull::Ready(Ok(Step::Done)) => return Pull::Ready(Ok(Step::Done)),
                Pull::Ready(Err(error)) => return Pull::Ready(Err(error)),
                Pull::Suspended => return Pull::Suspended,
            }
        }
        self.upstream.try_pull()
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            if self.released {
                return Ok(Step::Done);
            }
            while self.remaining > 0 {
                match self.upstream.pull().await? {
                    Step::Value(_) => self.remaining -= 1,
                    Step::Done => return Ok(Step::Done),
                }
            }
            self.upstream.pull().await
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
