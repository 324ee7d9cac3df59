//! The `flat_map` adapter and the [`Flat`] callback result.

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::source::{IntoSource, Source};
use crate::step::{Outcome, Pull, PullResult, Step};

/// What a [`flat_map`](crate::Sequence::flat_map) callback produced for one
/// upstream element: a bare value, or a sub-sequence to splice in.
///
/// The distinction matters at the edges: a bare value is emitted directly —
/// it is *not* treated as a one-element sequence — and an empty sub-sequence
/// contributes nothing but does not end the outer sequence.
///
/// # Examples
///
/// ```rust
/// use pullars::{Flat, Outcome, Sequence};
///
/// let doubled = Sequence::new(vec![1, 2, 3])
///     .flat_map(|x, _| Outcome::ready(Flat::many(vec![x, x])))
///     .to_vec()
///     .into_ready()
///     .unwrap()
///     .unwrap();
/// assert_eq!(doubled, vec![1, 1, 2, 2, 3, 3]);
/// ```
pub enum Flat<U> {
    /// A single value, emitted as-is.
    One(U),
    /// A sub-sequence, drained element by element before the next upstream
    /// element is pulled.
    Seq(Box<dyn Source<Item = U>>),
}

impl<U> Flat<U>
where
    U: Send + 'static,
{
    /// Wraps a bare value.
    pub fn one(value: U) -> Self {
        Self::One(value)
    }

    /// Wraps anything resolvable into a source as a sub-sequence.
    pub fn seq<I>(input: I) -> Self
    where
        I: IntoSource<Item = U>,
        I::Source: 'static,
    {
        Self::Seq(Box::new(input.into_source()))
    }

    /// Wraps a collection as a sub-sequence.
    pub fn many(values: Vec<U>) -> Self {
        Self::seq(values)
    }
}

/// Maps each upstream element through a callback and splices sub-sequences
/// flat into the output.
pub struct FlatMap<S, F, U> {
    upstream: S,
    callback: F,
    index: usize,
    sub: Option<Box<dyn Source<Item = U>>>,
    pending: Option<BoxFuture<'static, Result<Flat<U>, SequenceError>>>,
    done: bool,
    released: bool,
    faulted: bool,
}

impl<S, F, U> FlatMap<S, F, U> {
    pub(crate) fn new(upstream: S, callback: F) -> Self {
        Self {
            upstream,
            callback,
            index: 0,
            sub: None,
            pending: None,
            done: false,
            released: false,
            faulted: false,
        }
    }
}

impl<S, F, U> Source for FlatMap<S, F, U>
where
    S: Source,
    F: FnMut(S::Item, usize) -> Outcome<Flat<U>> + Send,
    U: Send + 'static,
{
    type Item = U;

    fn try_pull(&mut self) -> Pull<U> {
        if self.done {
            return Pull::Ready(Ok(Step::Done));
        }
        if self.pending.is_some() {
            return Pull::Suspended;
        }
        loop {
            if let Some(sub) = self.sub.as_mut() {
                match sub.try_pull() {
                    Pull::Ready(Ok(Step::Value(value))) => {
                        return Pull::Ready(Ok(Step::Value(value)));
                    }
                    // An exhausted sub-sequence continues with the next
                    // upstream element.
                    Pull::Ready(Ok(Step::Done)) => self.sub = None,
                    Pull::Ready(Err(error)) => return Pull::Ready(Err(error)),
                    Pull::Suspended => return Pull::Suspended,
                }
            } else {
                match self.upstream.try_pull() {
                    Pull::Ready(Ok(Step::Value(value))) => {
                        let index = self.index;
                        self.index += 1;
                        match (self.callback)(value, index) {
                            Outcome::Ready(Ok(Flat::One(mapped))) => {
                                return Pull::Ready(Ok(Step::Value(mapped)));
                            }
                            Outcome::Ready(Ok(Flat::Seq(source))) => self.sub = Some(source),
                            Outcome::Ready(Err(error)) => {
                                self.fail(&error);
                                return Pull::Ready(Err(error));
                            }
                            Outcome::Deferred(future) => {
                                self.pending = Some(future);
                                return Pull::Suspended;
                            }
                        }
                    }
                    Pull::Ready(Ok(Step::Done)) => {
                        self.done = true;
                        return Pull::Ready(Ok(Step::Done));
                    }
                    Pull::Ready(Err(error)) => return Pull::Ready(Err(error)),
                    Pull::Suspended => return Pull::Suspended,
                }
            }
        }
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<U>> {
        Box::pin(async move {
            if self.done {
                return Ok(Step::Done);
            }
            if let Some(future) = self.pending.take() {
                match future.await {
                    Ok(Flat::One(mapped)) => return Ok(Step::Value(mapped)),
                    Ok(Flat::Seq(source)) => self.sub = Some(source),
                    Err(error) => {
                        self.fail(&error);
                        return Err(error);
                    }
                }
            }
            loop {
                if let Some(sub) = self.sub.as_mut() {
                    match sub.pull().await? {
                        Step::Value(value) => return Ok(Step::Value(value)),
                        Step::Done => self.sub = None,
                    }
                } else {
                    match self.upstream.pull().await? {
                        Step::Value(value) => {
                            let index = self.index;
                            self.index += 1;
                            match (self.callback)(value, index).await {
                                Ok(Flat::One(mapped)) => return Ok(Step::Value(mapped)),
                                Ok(Flat::Seq(source)) => self.sub = Some(source),
                                Err(error) => {
                                    self.fail(&error);
                                    return Err(error);
                                }
                            }
                        }
                        Step::Done => {
                            self.done = true;
                            return Ok(Step::Done);
                        }
                    }
                }
            }
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.done = true;
            if let Some(sub) = self.sub.as_mut() {
                sub.release();
            }
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
