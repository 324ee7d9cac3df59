//! The `concat` adapter.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

/// Drains a primary source to completion, then a second one.
///
/// The second operand is resolved eagerly, when the combinator is built; it
/// is considered *active* only once the first source has exhausted. An early
/// release reaches both handles if the second was active, and only the first
/// otherwise.
pub struct Concat<S1, S2> {
    first: S1,
    second: S2,
    first_done: bool,
    done: bool,
    released: bool,
    faulted: bool,
}

impl<S1, S2> Concat<S1, S2> {
    pub(crate) fn new(first: S1, second: S2) -> Self {
        Self {
            first,
            second,
            first_done: false,
            done: false,
            released: false,
            faulted: false,
        }
    }
}

impl<S1, S2> Source for Concat<S1, S2>
where
    S1: Source,
    S2: Source<Item = S1::Item>,
{
    type Item = S1::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        if self.done {
            return Pull::Ready(Ok(Step::Done));
        }
        if !self.first_done {
            match self.first.try_pull() {
                Pull::Ready(Ok(Step::Done)) => self.first_done = true,
                other => return other,
            }
        }
        match self.second.try_pull() {
            Pull::Ready(Ok(Step::Done)) => {
                self.done = true;
                Pull::Ready(Ok(Step::Done))
            }
            other => other,
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        Box::pin(async move {
            if self.done {
                return Ok(Step::Done);
            }
            if !self.first_done {
                match self.first.pull().await? {
                    Step::Done => self.first_done = true,
                    step @ Step::Value(_) => return Ok(step),
                }
            }
            match self.second.pull().await? {
                Step::Done => {
                    self.done = true;
                    Ok(Step::Done)
                }
                step @ Step::Value(_) => Ok(step),
            }
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.done = true;
            self.first.release();
            if self.first_done {
                self.second.release();
            }
        }
    }

    fn fail(&mut self, error: &SequenceError) {
        if !self.faulted {
            self.faulted = true;
            if self.first_done {
                self.second.fail(error);
            } else {
                self.first.fail(error);
            }
        }
    }
}
