//! The `slice` adapter.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

/// Emits the upstream elements in the half-open window `start..end`.
///
/// Skipping to `start` works like [`Skip`](crate::combinator::Skip); the
/// exclusive end bound short-circuits like [`Take`](crate::combinator::Take),
/// releasing upstream exactly once. A window with `start >= end` is built
/// pre-exhausted and never pulls upstream at all.
pub struct Slice<S> {
    upstream: S,
    start: usize,
    end: Option<usize>,
    position: usize,
    empty_window: bool,
    done: bool,
    released: bool,
    faulted: bool,
}

impl<S> Slice<S> {
    pub(crate) fn new(upstream: S, start: usize, end: Option<usize>) -> Self {
        // An empty window must never touch upstream, not even to release it.
        let empty_window = end.is_some_and(|end| start >= end);
        Self {
            upstream,
            start,
            end,
            position: 0,
            empty_window,
            done: empty_window,
            released: false,
            faulted: false,
        }
    }

    fn at_end(&self) -> bool {
        self.end.is_some_and(|end| self.position >= end)
    }
}

impl<S> Source for Slice<S>
where
    S: Source,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        if self.done {
            return Pull::Ready(Ok(Step::Done));
        }
        while self.position < self.start {
            match self.upstream.try_pull() {
                Pull::Ready(Ok(Step::Value(_))) => self.position += 1,
                Pull::Ready(Ok(Step::Done)) => {
                    self.done = true;
                    return Pull::Ready(Ok(Step::Done));
                }
                Pull::Ready(Err(error)) => return Pull::Ready(Err(error)),
                Pull::Suspended => return Pull::Suspended,
            }
        }
        if self.at_end() {
            self.done = true;
            self.release();
            return Pull::Ready(Ok(Step::Done));
        }
        match self.upstream.try_pull() {
            Pull::Ready(Ok(Step::Value(value))) => {
                self.position += 1;
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
            while self.position < self.start {
                match self.upstream.pull().await? {
                    Step::Value(_) => self.position += 1,
                    Step::Done => {
                        self.done = true;
                        return Ok(Step::Done);
                    }
                }
            }
            if self.at_end() {
                self.done = true;
                self.release();
                return Ok(Step::Done);
            }
            match self.upstream.pull().await? {
                Step::Value(value) => {
                    self.position += 1;
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
            if !self.empty_window {
                self.upstream.release();
            }
        }
    }

    fn fail(&mut self, error: &SequenceError) {
        if !self.faulted {
            self.faulted = true;
            self.upstream.fail(error);
        }
    }
}
