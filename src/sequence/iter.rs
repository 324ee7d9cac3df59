//! The synchronous enumeration entry point.

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, Step};

/// An [`Iterator`] over a sequence, by the caller's declared intent to stay
/// synchronous.
///
/// Each `next` is one synchronous pull attempt. If the chain reaches an
/// asynchronous boundary the iterator yields
/// [`SequenceError::Suspended`] once and then reports exhaustion — the data
/// did not match the declared intent. Dropping the iterator before
/// exhaustion releases the source, mirroring an early `break` in the
/// consumer's loop.
///
/// # Examples
///
/// ```rust
/// use pullars::Sequence;
///
/// let mut collected = Vec::new();
/// for item in Sequence::new(vec![1, 2, 3]).iter() {
///     collected.push(item.unwrap());
/// }
/// assert_eq!(collected, vec![1, 2, 3]);
/// ```
pub struct SequenceIter<S>
where
    S: Source,
{
    source: Option<S>,
}

impl<S> SequenceIter<S>
where
    S: Source,
{
    pub(crate) fn new(source: S) -> Self {
        Self {
            source: Some(source),
        }
    }
}

impl<S> Iterator for SequenceIter<S>
where
    S: Source,
{
    type Item = Result<S::Item, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source.as_mut()?;
        match source.try_pull() {
            Pull::Ready(Ok(Step::Value(value))) => Some(Ok(value)),
            Pull::Ready(Ok(Step::Done)) => {
                self.source = None;
                None
            }
            Pull::Ready(Err(error)) => {
                source.fail(&error);
                self.source = None;
                Some(Err(error))
            }
            Pull::Suspended => {
                self.source = None;
                Some(Err(SequenceError::Suspended))
            }
        }
    }
}

impl<S> Drop for SequenceIter<S>
where
    S: Source,
{
    fn drop(&mut self) {
        // An early break releases the source; natural exhaustion already
        // cleared it.
        if let Some(source) = self.source.as_mut() {
            source.release();
        }
    }
}
