//! The user-facing composable sequence wrapper.
//!
//! A [`Sequence`] owns exactly one pull source and exposes the whole public
//! surface over it: the lazy combinators (each wraps the source in one
//! decorator adapter and returns a new `Sequence`), the eager terminal
//! operations (each drives the source to completion or early termination and
//! returns an [`Outcome`]), and the two declared-intent enumeration entry
//! points, [`Sequence::iter`] and [`Sequence::stream`].
//!
//! Whether a given pipeline runs synchronously is not a property of the
//! wrapper — it is discovered while driving it. The same chain resolves as
//! [`Outcome::Ready`] over an in-memory source and as [`Outcome::Deferred`]
//! the moment any layer suspends.
//!
//! # Examples
//!
//! ```rust
//! use pullars::{Outcome, Sequence};
//!
//! let sum = Sequence::new(vec![1, 2, 3, 4])
//!     .map(|x, _| Outcome::ready(x * 2))
//!     .filter(|x, _| Outcome::ready(x % 4 == 0))
//!     .fold(0, |acc, x, _| Outcome::ready(acc + x));
//! assert_eq!(sum.into_ready().unwrap().unwrap(), 12);
//! ```

mod iter;
mod stream;
mod terminal;

pub use iter::SequenceIter;
pub use stream::SequenceStream;

use crate::combinator::{Concat, Filter, Flat, FlatMap, Map, MapError, Skip, Slice, Take, Transform};
use crate::error::SequenceError;
use crate::source::{EmptySource, IntoSource, IterSource, LazySource, Source, StreamSource, TryIterSource, TryStreamSource};
use crate::step::Outcome;

/// A composable, dual-mode pull sequence.
///
/// See the [module documentation](self) for an overview.
pub struct Sequence<S> {
    source: S,
}

// =============================================================================
// Construction (the resolver entry points)
// =============================================================================

impl<S> Sequence<S>
where
    S: Source,
{
    /// Wraps anything resolvable into a source: a collection, another
    /// sequence, or a bare source value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::Sequence;
    ///
    /// let sequence = Sequence::new(vec![1, 2, 3]);
    /// assert_eq!(sequence.to_vec().into_ready().unwrap().unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn new<I>(input: I) -> Self
    where
        I: IntoSource<Source = S>,
    {
        Self {
            source: input.into_source(),
        }
    }

    /// Consumes the wrapper, returning the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, F, T> Sequence<Transform<S, F, T>>
where
    S: Source,
    F: FnMut(S::Item) -> Outcome<T> + Send,
    T: Send + 'static,
{
    /// Wraps an input together with a per-element transform.
    ///
    /// The transform is attached once, at construction, and applied exactly
    /// once per raw element no matter how many combinators later read
    /// through the wrapper.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let labels = Sequence::with_transform(vec![1, 2], |n| Outcome::ready(format!("#{n}")))
    ///     .to_vec()
    ///     .into_ready()
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(labels, vec!["#1", "#2"]);
    /// ```
    pub fn with_transform<I>(input: I, transform: F) -> Self
    where
        I: IntoSource<Source = S>,
    {
        Self {
            source: Transform::new(input.into_source(), transform),
        }
    }
}

impl<I> Sequence<IterSource<I>>
where
    I: Iterator + Send,
    I::Item: Send + 'static,
{
    /// Wraps any iterator.
    pub fn from_iter(iter: I) -> Self {
        Self {
            source: IterSource::new(iter),
        }
    }
}

impl<I, T> Sequence<TryIterSource<I>>
where
    I: Iterator<Item = Result<T, SequenceError>> + Send,
    T: Send + 'static,
{
    /// Wraps an iterator of fallible pulls.
    pub fn from_try_iter(iter: I) -> Self {
        Self {
            source: TryIterSource::new(iter),
        }
    }
}

impl<St> Sequence<StreamSource<St>>
where
    St: futures::Stream + Send,
    St::Item: Send + 'static,
{
    /// Wraps any [`Stream`](futures::Stream).
    ///
    /// The stream is probed synchronously first; it suspends the chain only
    /// when a poll is genuinely pending.
    pub fn from_stream(stream: St) -> Self {
        Self {
            source: StreamSource::new(stream),
        }
    }
}

impl<St, T> Sequence<TryStreamSource<St>>
where
    St: futures::Stream<Item = Result<T, SequenceError>> + Send,
    T: Send + 'static,
{
    /// Wraps a stream of fallible pulls.
    pub fn from_try_stream(stream: St) -> Self {
        Self {
            source: TryStreamSource::new(stream),
        }
    }
}

impl<F, I> Sequence<LazySource<F, I>>
where
    F: FnOnce() -> I + Send,
    I: IntoSource,
{
    /// Wraps a producer closure, invoked once on first pull.
    pub fn from_fn(thunk: F) -> Self {
        Self {
            source: LazySource::new(thunk),
        }
    }
}

impl<T> Sequence<EmptySource<T>>
where
    T: Send + 'static,
{
    /// Builds a sequence with no elements.
    pub fn empty() -> Self {
        Self {
            source: EmptySource::new(),
        }
    }
}

// =============================================================================
// Lazy combinators
// =============================================================================

impl<S> Sequence<S>
where
    S: Source,
{
    /// Maps each element through `callback`, which receives the element and
    /// its index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let doubled = Sequence::new(vec![1, 2, 3])
    ///     .map(|x, _| Outcome::ready(x * 2))
    ///     .to_vec()
    ///     .into_ready()
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    pub fn map<F, U>(self, callback: F) -> Sequence<Map<S, F, U>>
    where
        F: FnMut(S::Item, usize) -> Outcome<U> + Send,
        U: Send + 'static,
    {
        Sequence {
            source: Map::new(self.source, callback),
        }
    }

    /// Keeps only the elements `predicate` accepts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence};
    ///
    /// let small = Sequence::new(vec![1, 2, 3])
    ///     .filter(|x, _| Outcome::ready(*x < 3))
    ///     .to_vec()
    ///     .into_ready()
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(small, vec![1, 2]);
    /// ```
    pub fn filter<F>(self, predicate: F) -> Sequence<Filter<S, F>>
    where
        F: FnMut(&S::Item, usize) -> Outcome<bool> + Send,
    {
        Sequence {
            source: Filter::new(self.source, predicate),
        }
    }

    /// Emits at most `limit` elements, releasing upstream when the budget
    /// is spent.
    pub fn take(self, limit: usize) -> Sequence<Take<S>> {
        Sequence {
            source: Take::new(self.source, limit),
        }
    }

    /// Discards the first `count` elements, then proxies the rest unchanged.
    pub fn drop(self, count: usize) -> Sequence<Skip<S>> {
        Sequence {
            source: Skip::new(self.source, count),
        }
    }

    /// Emits the elements in the half-open window `start..end`.
    ///
    /// With `end` absent the window is unbounded on the right. An empty
    /// window (`start >= end`) never pulls upstream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::Sequence;
    ///
    /// let window = Sequence::new(vec![1, 2, 3, 4])
    ///     .slice(1, 3)
    ///     .to_vec()
    ///     .into_ready()
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(window, vec![2, 3]);
    /// ```
    pub fn slice(self, start: usize, end: impl Into<Option<usize>>) -> Sequence<Slice<S>> {
        Sequence {
            source: Slice::new(self.source, start, end.into()),
        }
    }

    /// Drains this sequence to completion, then `other`.
    ///
    /// The second operand is resolved eagerly, at call time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::Sequence;
    ///
    /// let joined = Sequence::new(vec![1, 2])
    ///     .concat(vec![3, 4])
    ///     .to_vec()
    ///     .into_ready()
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(joined, vec![1, 2, 3, 4]);
    /// ```
    pub fn concat<I>(self, other: I) -> Sequence<Concat<S, I::Source>>
    where
        I: IntoSource<Item = S::Item>,
    {
        Sequence {
            source: Concat::new(self.source, other.into_source()),
        }
    }

    /// Maps each element through `callback` and splices sub-sequences flat
    /// into the output.
    ///
    /// A [`Flat::One`] result is emitted directly; a [`Flat::Seq`] result is
    /// drained element by element before the next upstream element is
    /// pulled.
    pub fn flat_map<F, U>(self, callback: F) -> Sequence<FlatMap<S, F, U>>
    where
        F: FnMut(S::Item, usize) -> Outcome<Flat<U>> + Send,
        U: Send + 'static,
    {
        Sequence {
            source: FlatMap::new(self.source, callback),
        }
    }

    /// Converts failed pulls into elements instead of letting them
    /// propagate.
    ///
    /// The sequence is not ended by a caught failure; the next pull
    /// proceeds normally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullars::{Outcome, Sequence, SequenceError};
    ///
    /// let recovered = Sequence::from_try_iter(
    ///     vec![Ok(1), Err(SequenceError::message("gap")), Ok(3)].into_iter(),
    /// )
    /// .map_error(|_| Outcome::ready(0))
    /// .to_vec()
    /// .into_ready()
    /// .unwrap()
    /// .unwrap();
    /// assert_eq!(recovered, vec![1, 0, 3]);
    /// ```
    pub fn map_error<F>(self, handler: F) -> Sequence<MapError<S, F>>
    where
        F: FnMut(SequenceError) -> Outcome<S::Item> + Send,
    {
        Sequence {
            source: MapError::new(self.source, handler),
        }
    }

    /// Returns the synchronous enumeration entry point.
    ///
    /// Selecting it declares the caller's intent to stay synchronous: if the
    /// chain reaches an asynchronous boundary the iterator yields
    /// [`SequenceError::Suspended`] once and then reports exhaustion.
    /// Dropping the iterator before exhaustion releases the source.
    pub fn iter(self) -> SequenceIter<S> {
        SequenceIter::new(self.source)
    }
}

impl<S> Sequence<S>
where
    S: Source + 'static,
{
    /// Returns the asynchronous enumeration entry point, a
    /// [`Stream`](futures::Stream) of fallible elements.
    pub fn stream(self) -> SequenceStream<S> {
        SequenceStream::new(self.source)
    }
}
