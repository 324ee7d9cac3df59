//! The eager terminal operations.
//!
//! Every operation here is the same two-phase shape: a synchronous driver
//! loop over `try_pull` and immediate callback outcomes, and a free async
//! continuation that takes over — owning the source, the callback, and the
//! counters — the instant anything defers. The driver never runs again for
//! that call; the continuation finishes it and the operation's own result
//! becomes a deferred [`Outcome`].
//!
//! Release discipline, per operation: the short-circuit family (`every`,
//! `some`, `find`, `at`) releases the source exactly once when it terminates
//! early; `to_vec` and `at` also release after a natural drain; `for_each`,
//! `reduce`, and `fold` run to exhaustion and release nothing.

use crate::error::SequenceError;
use crate::sequence::Sequence;
use crate::source::Source;
use crate::step::{Outcome, Pull, Step};

impl<S> Sequence<S>
where
    S: Source + 'static,
{
    /// Returns `true` if `predicate` holds for every element.
    ///
    /// Short-circuits on the first failing element, releasing the source;
    /// an empty sequence is vacuously `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let all_small = Sequence::new(vec![1, 2, 3]).every(|x, _| Outcome::ready(x < 5));
    /// assert!(all_small.into_ready().unwrap().unwrap());
    /// ```
    pub fn every<F>(self, mut predicate: F) -> Outcome<bool>
    where
        F: FnMut(S::Item, usize) -> Outcome<bool> + Send + 'static,
    {
        let mut source = self.source;
        let mut index = 0;
        loop {
            match source.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => {
                    let current = index;
                    index += 1;
                    match predicate(value, current) {
                        Outcome::Ready(Ok(true)) => {}
                        Outcome::Ready(Ok(false)) => {
                            source.release();
                            return Outcome::ready(false);
                        }
                        Outcome::Ready(Err(error)) => {
                            source.fail(&error);
                            return Outcome::error(error);
                        }
                        Outcome::Deferred(future) => {
                            return Outcome::defer(async move {
                                match future.await {
                                    Ok(true) => every_deferred(source, predicate, index).await,
                                    Ok(false) => {
                                        source.release();
                                        Ok(false)
                                    }
                                    Err(error) => {
                                        source.fail(&error);
                                        Err(error)
                                    }
                                }
                            });
                        }
                    }
                }
                Pull::Ready(Ok(Step::Done)) => return Outcome::ready(true),
                Pull::Ready(Err(error)) => {
                    source.fail(&error);
                    return Outcome::error(error);
                }
                Pull::Suspended => return Outcome::defer(every_deferred(source, predicate, index)),
            }
        }
    }

    /// Returns `true` if `predicate` holds for any element.
    ///
    /// Short-circuits on the first passing element, releasing the source;
    /// an empty sequence is `false`.
    pub fn some<F>(self, mut predicate: F) -> Outcome<bool>
    where
        F: FnMut(S::Item, usize) -> Outcome<bool> + Send + 'static,
    {
        let mut source = self.source;
        let mut index = 0;
        loop {
            match source.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => {
                    let current = index;
                    index += 1;
                    match predicate(value, current) {
                        Outcome::Ready(Ok(false)) => {}
                        Outcome::Ready(Ok(true)) => {
                            source.release();
                            return Outcome::ready(true);
                        }
                        Outcome::Ready(Err(error)) => {
                            source.fail(&error);
                            return Outcome::error(error);
                        }
                        Outcome::Deferred(future) => {
                            return Outcome::defer(async move {
                                match future.await {
                                    Ok(false) => some_deferred(source, predicate, index).await,
                                    Ok(true) => {
                                        source.release();
                                        Ok(true)
                                    }
                                    Err(error) => {
                                        source.fail(&error);
                                        Err(error)
                                    }
                                }
                            });
                        }
                    }
                }
                Pull::Ready(Ok(Step::Done)) => return Outcome::ready(false),
                Pull::Ready(Err(error)) => {
                    source.fail(&error);
                    return Outcome::error(error);
                }
                Pull::Suspended => return Outcome::defer(some_deferred(source, predicate, index)),
            }
        }
    }

    /// Returns the first element for which `predicate` holds.
    ///
    /// Releases the source immediately on a match; natural exhaustion
    /// returns `None` without a release call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let found = Sequence::new(vec![1, 2, 3]).find(|x, _| Outcome::ready(*x == 2));
    /// assert_eq!(found.into_ready().unwrap().unwrap(), Some(2));
    /// ```
    pub fn find<F>(self, mut predicate: F) -> Outcome<Option<S::Item>>
    where
        F: FnMut(&S::Item, usize) -> Outcome<bool> + Send + 'static,
    {
        let mut source = self.source;
        let mut index = 0;
        loop {
            match source.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => {
                    let current = index;
                    index += 1;
                    match predicate(&value, current) {
                        Outcome::Ready(Ok(true)) => {
                            source.release();
                            return Outcome::ready(Some(value));
                        }
                        Outcome::Ready(Ok(false)) => {}
                        Outcome::Ready(Err(error)) => {
                            source.fail(&error);
                            return Outcome::error(error);
                        }
                        Outcome::Deferred(future) => {
                            return Outcome::defer(async move {
                                match future.await {
                                    Ok(true) => {
                                        source.release();
                                        Ok(Some(value))
                                    }
                                    Ok(false) => find_deferred(source, predicate, index).await,
                                    Err(error) => {
                                        source.fail(&error);
                                        Err(error)
                                    }
                                }
                            });
                        }
                    }
                }
                Pull::Ready(Ok(Step::Done)) => return Outcome::ready(None),
                Pull::Ready(Err(error)) => {
                    source.fail(&error);
                    return Outcome::error(error);
                }
                Pull::Suspended => return Outcome::defer(find_deferred(source, predicate, index)),
            }
        }
    }

    /// Invokes `action` for each element, driving the sequence to
    /// completion.
    pub fn for_each<F>(self, mut action: F) -> Outcome<()>
    where
        F: FnMut(S::Item, usize) -> Outcome<()> + Send + 'static,
    {
        let mut source = self.source;
        let mut index = 0;
        loop {
            match source.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => {
                    let current = index;
                    index += 1;
                    match action(value, current) {
                        Outcome::Ready(Ok(())) => {}
                        Outcome::Ready(Err(error)) => {
                            source.fail(&error);
                            return Outcome::error(error);
                        }
                        Outcome::Deferred(future) => {
                            return Outcome::defer(async move {
                                match future.await {
                                    Ok(()) => for_each_deferred(source, action, index).await,
                                    Err(error) => {
                                        source.fail(&error);
                                        Err(error)
                                    }
                                }
                            });
                        }
                    }
                }
                Pull::Ready(Ok(Step::Done)) => return Outcome::ready(()),
                Pull::Ready(Err(error)) => {
                    source.fail(&error);
                    return Outcome::error(error);
                }
                Pull::Suspended => {
                    return Outcome::defer(for_each_deferred(source, action, index));
                }
            }
        }
    }

    /// Folds the sequence left-to-right, seeding the accumulator with the
    /// first element.
    ///
    /// The callback's index starts at 1 — the seed element is index 0. An
    /// empty sequence fails with
    /// [`SequenceError::EmptyReduce`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let sum = Sequence::new(vec![1, 2, 3]).reduce(|acc, x, _| Outcome::ready(acc + x));
    /// assert_eq!(sum.into_ready().unwrap().unwrap(), 6);
    /// ```
    pub fn reduce<F>(self, f: F) -> Outcome<S::Item>
    where
        F: FnMut(S::Item, S::Item, usize) -> Outcome<S::Item> + Send + 'static,
    {
        let mut source = self.source;
        match source.try_pull() {
            Pull::Ready(Ok(Step::Value(seed))) => fold_driver(source, f, seed, 1),
            Pull::Ready(Ok(Step::Done)) => Outcome::error(SequenceError::EmptyReduce),
            Pull::Ready(Err(error)) => {
                source.fail(&error);
                Outcome::error(error)
            }
            Pull::Suspended => Outcome::defer(async move {
                match source.pull().await {
                    Ok(Step::Value(seed)) => fold_deferred(source, f, seed, 1).await,
                    Ok(Step::Done) => Err(SequenceError::EmptyReduce),
                    Err(error) => {
                        source.fail(&error);
                        Err(error)
                    }
                }
            }),
        }
    }

    /// Folds the sequence left-to-right from an initial accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let sum = Sequence::new(vec![1, 2, 3]).fold(10, |acc, x, _| Outcome::ready(acc + x));
    /// assert_eq!(sum.into_ready().unwrap().unwrap(), 16);
    /// ```
    pub fn fold<A, F>(self, initial: A, f: F) -> Outcome<A>
    where
        A: Send + 'static,
        F: FnMut(A, S::Item, usize) -> Outcome<A> + Send + 'static,
    {
        fold_driver(self.source, f, initial, 0)
    }

    /// Drains the whole sequence into a `Vec`, in pull order.
    ///
    /// Releases the source once the drain completes.
    pub fn to_vec(self) -> Outcome<Vec<S::Item>> {
        let mut source = self.source;
        let mut items = Vec::new();
        loop {
            match source.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => items.push(value),
                Pull::Ready(Ok(Step::Done)) => {
                    source.release();
                    return Outcome::ready(items);
                }
                Pull::Ready(Err(error)) => {
                    source.fail(&error);
                    return Outcome::error(error);
                }
                Pull::Suspended => return Outcome::defer(to_vec_deferred(source, items)),
            }
        }
    }

    /// Returns the element at `index`, or `None` if the sequence is
    /// shorter.
    ///
    /// Releases the source immediately after locating — or failing to
    /// locate — the target.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::Sequence;
    ///
    /// let missing = Sequence::new(vec![1, 2, 3]).at(5);
    /// assert_eq!(missing.into_ready().unwrap().unwrap(), None);
    /// ```
    pub fn at(self, index: usize) -> Outcome<Option<S::Item>> {
        let mut source = self.source;
        let mut current = 0usize;
        loop {
            match source.try_pull() {
                Pull::Ready(Ok(Step::Value(value))) => {
                    if current == index {
                        source.release();
                        return Outcome::ready(Some(value));
                    }
                    current += 1;
                }
                Pull::Ready(Ok(Step::Done)) => {
                    source.release();
                    return Outcome::ready(None);
                }
                Pull::Ready(Err(error)) => {
                    source.fail(&error);
                    return Outcome::error(error);
                }
                Pull::Suspended => return Outcome::defer(at_deferred(source, index, current)),
            }
        }
    }
}

// =============================================================================
// Asynchronous continuations
// =============================================================================

async fn every_deferred<S, F>(
    mut source: S,
    mut predicate: F,
    mut index: usize,
) -> Result<bool, SequenceError>
where
    S: Source,
    F: FnMut(S::Item, usize) -> Outcome<bool> + Send,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => {
                let current = index;
                index += 1;
                match predicate(value, current).await {
                    Ok(true) => {}
                    Ok(false) => {
                        source.release();
                        return Ok(false);
                    }
                    Err(error) => {
                        source.fail(&error);
                        return Err(error);
                    }
                }
            }
            Ok(Step::Done) => return Ok(true),
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}

async fn some_deferred<S, F>(
    mut source: S,
    mut predicate: F,
    mut index: usize,
) -> Result<bool, SequenceError>
where
    S: Source,
    F: FnMut(S::Item, usize) -> Outcome<bool> + Send,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => {
                let current = index;
                index += 1;
                match predicate(value, current).await {
                    Ok(false) => {}
                    Ok(true) => {
                        source.release();
                        return Ok(true);
                    }
                    Err(error) => {
                        source.fail(&error);
                        return Err(error);
                    }
                }
            }
            Ok(Step::Done) => return Ok(false),
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}

async fn find_deferred<S, F>(
    mut source: S,
    mut predicate: F,
    mut index: usize,
) -> Result<Option<S::Item>, SequenceError>
where
    S: Source,
    F: FnMut(&S::Item, usize) -> Outcome<bool> + Send,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => {
                let current = index;
                index += 1;
                match predicate(&value, current).await {
                    Ok(true) => {
                        source.release();
                        return Ok(Some(value));
                    }
                    Ok(false) => {}
                    Err(error) => {
                        source.fail(&error);
                        return Err(error);
                    }
                }
            }
            Ok(Step::Done) => return Ok(None),
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}

async fn for_each_deferred<S, F>(
    mut source: S,
    mut action: F,
    mut index: usize,
) -> Result<(), SequenceError>
where
    S: Source,
    F: FnMut(S::Item, usize) -> Outcome<()> + Send,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => {
                let current = index;
                index += 1;
                match action(value, current).await {
                    Ok(()) => {}
                    Err(error) => {
                        source.fail(&error);
                        return Err(error);
                    }
                }
            }
            Ok(Step::Done) => return Ok(()),
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}

fn fold_driver<S, A, F>(mut source: S, mut f: F, mut accumulator: A, mut index: usize) -> Outcome<A>
where
    S: Source + 'static,
    A: Send + 'static,
    F: FnMut(A, S::Item, usize) -> Outcome<A> + Send + 'static,
{
    loop {
        match source.try_pull() {
            Pull::Ready(Ok(Step::Value(value))) => {
                let current = index;
                index += 1;
                match f(accumulator, value, current) {
                    Outcome::Ready(Ok(next)) => accumulator = next,
                    Outcome::Ready(Err(error)) => {
                        source.fail(&error);
                        return Outcome::error(error);
                    }
                    Outcome::Deferred(future) => {
                        return Outcome::defer(async move {
                            match future.await {
                                Ok(next) => fold_deferred(source, f, next, index).await,
                                Err(error) => {
                                    source.fail(&error);
                                    Err(error)
                                }
                            }
                        });
                    }
                }
            }
            Pull::Ready(Ok(Step::Done)) => return Outcome::ready(accumulator),
            Pull::Ready(Err(error)) => {
                source.fail(&error);
                return Outcome::error(error);
            }
            Pull::Suspended => return Outcome::defer(fold_deferred(source, f, accumulator, index)),
        }
    }
}

async fn fold_deferred<S, A, F>(
    mut source: S,
    mut f: F,
    mut accumulator: A,
    mut index: usize,
) -> Result<A, SequenceError>
where
    S: Source,
    A: Send,
    F: FnMut(A, S::Item, usize) -> Outcome<A> + Send,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => {
                let current = index;
                index += 1;
                match f(accumulator, value, current).await {
                    Ok(next) => accumulator = next,
                    Err(error) => {
                        source.fail(&error);
                        return Err(error);
                    }
                }
            }
            Ok(Step::Done) => return Ok(accumulator),
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}

async fn to_vec_deferred<S>(mut source: S, mut items: Vec<S::Item>) -> Result<Vec<S::Item>, SequenceError>
where
    S: Source,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => items.push(value),
            Ok(Step::Done) => {
                source.release();
                return Ok(items);
            }
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}

async fn at_deferred<S>(
    mut source: S,
    index: usize,
    mut current: usize,
) -> Result<Option<S::Item>, SequenceError>
where
    S: Source,
{
    loop {
        match source.pull().await {
            Ok(Step::Value(value)) => {
                if current == index {
                    source.release();
                    return Ok(Some(value));
                }
                current += 1;
            }
            Ok(Step::Done) => {
                source.release();
                return Ok(None);
            }
            Err(error) => {
                source.fail(&error);
                return Err(error);
            }
        }
    }
}
