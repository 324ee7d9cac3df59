//! The `filter` adapter.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Outcome, Pull, PullResult, Step};

/// Emits only the upstream elements the predicate accepts.
///
/// Rejected elements are consumed in an internal scan loop rather than being
/// handed back to the caller. When the predicate defers, the candidate
/// element travels with its pending verdict so the scan resumes from the
/// asynchronous continuation without re-testing or losing it.
pub struct Filter<S, F>
where
    S: Source,
{
    upstream: S,
    predicate: F,
    index: usize,
    pending: Option<(S::Item, BoxFuture<'static, Result<bool, SequenceError>>)>,
    released: bool,
    faulted: bool,
}

impl<S, F> Filter<S, F>
where
    S: Source,
{
    pub(crate) fn new(upstream: S, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            index: 0,
            pending: None,
            released: false,
            faulted: false,
        }
    }
}

impl<S, F> Source for Filter<S, F>
where
    S: Source,
    F: FnMut(&S::Item, usize) -> Outcome<bool> + Send,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        if self.released {
            return Pull::Ready(Ok(Step::Done));
        }
        if self.pending.is_some() {
            return Pull::Suspended;
        }
        loop {
            match self.upstream.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => {
                    let index = self.index;
                    self.index += 1;
                    match (self.predicate)(&value, index) {
                        Outcome::Ready(Ok(true)) => return Pull::Ready(Ok(Step::Value(value))),
                        Outcome::Ready(Ok(false)) => {}
                        Outcome::Ready(Err(error)) => {
                            self.fail(&error);
                            return Pull::Ready(Err(error));
                        }
                        Outcome::Deferred(future) => {
                            self.pending = Some((value, future));
                            return Pull::Suspended;
                        }
                    }
                }
                Pull::Ready(Ok(Step::Done)) => return Pull::Ready(Ok(Step::Done)),
                Pull::Ready(Err(error)) => return Pull::Ready(Err(error)),
                Pull::Suspended => return Pull::Suspended,
            }
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            if self.released {
                return Ok(Step::Done);
            }
            if let Some((candidate, future)) = self.pending.take() {
                match future.await {
                    Ok(true) => return Ok(Step::Value(candidate)),
                    Ok(false) => {}
                    Err(error) => {
                        self.fail(&error);
                        return Err(error);
                    }
                }
            }
            loop {
                match self.upstream.pull().await? {
                    Step::Done => return Ok(Step::Done),
                    Step::Value(value) => {
                        let index = self.index;
                        self.index += 1;
                        match (self.predicate)(&value, index).await {
                            Ok(true) => return Ok(Step::Value(value)),
                            Ok(false) => {}
                            Err(error) => {
                                self.fail(&error);
                                return Err(error);
                            }
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
