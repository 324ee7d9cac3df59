//! Pull sources: the handles a [`Sequence`](crate::Sequence) is driven from.
//!
//! A [`Source`] is the unit of iteration state. It is owned by exactly one
//! consumer at a time — a combinator adapter, a terminal operation, or an
//! enumeration adapter — and is pulled through a two-phase protocol:
//!
//! 1. [`Source::try_pull`] attempts to produce the next [`Step`]
//!    synchronously. Sources answer [`Pull::Ready`] for as long as they can
//!    make progress without suspending.
//! 2. The first [`Pull::Suspended`] switches the caller to
//!    [`Source::pull`], the asynchronous continuation. It resumes exactly
//!    where the synchronous attempt left off — including any half-processed
//!    element — and drives the remainder of the call.
//!
//! The lifecycle calls complete the protocol: [`Source::release`] is the
//! early-termination cleanup signal, [`Source::fail`] the cooperative
//! failure notification. Both propagate upstream through a combinator chain
//! at most once per handle.
//!
//! Leaf implementations live in the submodules: iterator-backed sources,
//! stream-backed sources, the lazily-produced source, and the conversions of
//! the [`IntoSource`] resolver.

mod iter;
mod lazy;
mod resolve;
mod stream;

pub use iter::{EmptySource, IterSource, TryIterSource};
pub use lazy::LazySource;
pub use resolve::IntoSource;
pub use stream::{StreamSource, TryStreamSource};

use futures::future::BoxFuture;

use crate::error::SequenceError;
use crate::step::{Pull, PullResult};

/// A pull handle: successive elements are requested from it on demand.
///
/// Implementations must uphold three invariants:
///
/// - **Exhaustion is terminal.** After reporting [`Step::Done`], every later
///   pull reports it again.
/// - **Suspension is resumable.** Answering [`Pull::Suspended`] must leave
///   the source in a state where [`Source::pull`] continues the same logical
///   step; no element may be lost or delivered twice across the switch.
/// - **Lifecycle calls are idempotent.** A second [`release`](Source::release)
///   or [`fail`](Source::fail) must not reach upstream again.
///
/// [`Step::Done`]: crate::Step::Done
pub trait Source: Send {
    /// The element type produced by this source.
    type Item: Send + 'static;

    /// Attempts to pull the next step without suspending.
    fn try_pull(&mut self) -> Pull<Self::Item>;

    /// Pulls the next step, suspending as needed.
    ///
    /// This is the asynchronous continuation of [`try_pull`](Source::try_pull);
    /// once a caller has observed [`Pull::Suspended`] it drives the rest of
    /// the call through this method, even when later steps would have been
    /// available synchronously.
    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>>;

    /// Signals early termination: no further pulls will follow.
    ///
    /// Called by short-circuiting consumers before they report their own
    /// completion. Sources drop whatever they hold; combinators forward the
    /// call to their upstream exactly once.
    fn release(&mut self);

    /// Signals a failure raised downstream, for cooperative cleanup.
    ///
    /// Best-effort: the built-in leaf sources have nothing to clean up and
    /// ignore it; custom sources may react. Combinators forward the call to
    /// their upstream exactly once.
    fn fail(&mut self, error: &SequenceError);
}

impl<S> Source for Box<S>
where
    S: Source + ?Sized,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        (**self).try_pull()
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        (**self).pull()
    }

    fn release(&mut self) {
        (**self).release();
    }

    fn fail(&mut self, error: &SequenceError) {
        (**self).fail(error);
    }
}
