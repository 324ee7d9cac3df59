//! The resolver: typed conversion of inputs into pull sources.
//!
//! Anything that can stand at the head of a pipeline — or as the second
//! operand of [`concat`](crate::Sequence::concat), or as a
//! [`flat_map`](crate::Sequence::flat_map) sub-sequence — implements
//! [`IntoSource`]: collections, other sequences, and bare source values.
//! Inputs that cannot resolve into a source are unrepresentable here, so
//! the "Argument is not iterable" class of failure has no runtime path.
//!
//! Implementations are deliberately concrete. A blanket implementation over
//! [`IntoIterator`] would forbid the [`Sequence`] implementation under
//! coherence, and one implementation per concrete container keeps the
//! recognition order readable.

use crate::sequence::Sequence;
use crate::source::{
    EmptySource, IterSource, LazySource, Source, StreamSource, TryIterSource, TryStreamSource,
};

/// Conversion into a pull [`Source`].
///
/// # Examples
///
/// ```rust
/// use pullars::Sequence;
///
/// // Collections resolve directly...
/// let from_vec = Sequence::new(vec![1, 2, 3]);
/// // ...and so does another sequence, reused as-is.
/// let from_seq = Sequence::new(from_vec.map(|x, _| pullars::Outcome::ready(x * 2)));
/// assert_eq!(from_seq.to_vec().into_ready().unwrap().unwrap(), vec![2, 4, 6]);
/// ```
pub trait IntoSource {
    /// The element type of the resolved source.
    type Item: Send + 'static;
    /// The resolved source type.
    type Source: Source<Item = Self::Item>;

    /// Resolves `self` into a pull source.
    fn into_source(self) -> Self::Source;
}

impl<T> IntoSource for Vec<T>
where
    T: Send + 'static,
{
    type Item = T;
    type Source = IterSource<std::vec::IntoIter<T>>;

    fn into_source(self) -> Self::Source {
        IterSource::new(self.into_iter())
    }
}

impl<T, const N: usize> IntoSource for [T; N]
where
    T: Send + 'static,
{
    type Item = T;
    type Source = IterSource<std::array::IntoIter<T, N>>;

    fn into_source(self) -> Self::Source {
        IterSource::new(self.into_iter())
    }
}

impl<S> IntoSource for Sequence<S>
where
    S: Source,
{
    type Item = S::Item;
    type Source = S;

    fn into_source(self) -> Self::Source {
        self.into_inner()
    }
}

impl<S> IntoSource for Box<S>
where
    S: Source + ?Sized,
{
    type Item = S::Item;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<I> IntoSource for IterSource<I>
where
    I: Iterator + Send,
    I::Item: Send + 'static,
{
    type Item = I::Item;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<I, T> IntoSource for TryIterSource<I>
where
    I: Iterator<Item = Result<T, crate::SequenceError>> + Send,
    T: Send + 'static,
{
    type Item = T;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<St> IntoSource for StreamSource<St>
where
    St: futures::Stream + Send,
    St::Item: Send + 'static,
{
    type Item = St::Item;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<St, T> IntoSource for TryStreamSource<St>
where
    St: futures::Stream<Item = Result<T, crate::SequenceError>> + Send,
    T: Send + 'static,
{
    type Item = T;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<F, I> IntoSource for LazySource<F, I>
where
    F: FnOnce() -> I + Send,
    I: IntoSource,
{
    type Item = I::Item;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<T> IntoSource for EmptySource<T>
where
    T: Send + 'static,
{
    type Item = T;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}
