//! # pullars
//!
//! Dual-mode sequence combinators: lazy pull-based pipelines over
//! synchronous and asynchronous sources.
//!
//! ## Overview
//!
//! A [`Sequence`] wraps one pull source — a collection, an iterator, a
//! [`Stream`](futures::Stream), a lazily-invoked producer — and composes the
//! usual combinators over it: `map`, `filter`, `take`, `drop`, `slice`,
//! `concat`, `flat_map`, `map_error`, plus the eager terminals `every`,
//! `some`, `find`, `for_each`, `reduce`, `fold`, `to_vec`, and `at`.
//!
//! The caller never declares whether the data is synchronous. Every
//! operation attempts synchronous progress and, the instant a pull, a
//! transform, or a callback defers, switches that call to an asynchronous
//! continuation — returning [`Outcome::Deferred`] instead of a ready value,
//! and never reverting within the call. Element order is preserved across
//! the switch, transforms run exactly once per element, and early
//! termination releases the source exactly once.
//!
//! ## Example
//!
//! ```rust
//! use pullars::{Outcome, Sequence};
//!
//! // An all-synchronous chain resolves without an executor...
//! let firsts = Sequence::new(vec![1, 2, 3, 4])
//!     .map(|x, _| Outcome::ready(x * 2))
//!     .take(3)
//!     .to_vec();
//! assert_eq!(firsts.into_ready().unwrap().unwrap(), vec![2, 4, 6]);
//!
//! // ...and the same chain over a deferring callback becomes a future.
//! let deferred = Sequence::new(vec![1, 2, 3, 4])
//!     .map(|x, _| Outcome::defer(async move { Ok(x * 2) }))
//!     .take(3)
//!     .to_vec();
//! assert!(deferred.is_deferred());
//! let collected = futures::executor::block_on(async { deferred.await });
//! assert_eq!(collected.unwrap(), vec![2, 4, 6]);
//! ```
//!
//! ## Concurrency model
//!
//! Single-threaded cooperative pulling only: element *k+1* is never
//! requested before element *k* has finished processing, in either mode.
//! There is no parallelism, no back-pressure, and no cancellation beyond the
//! cooperative release protocol.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the types needed to build and drive sequences.
///
/// # Usage
///
/// ```rust
/// use pullars::prelude::*;
/// ```
pub mod prelude {
    pub use crate::combinator::Flat;
    pub use crate::error::SequenceError;
    pub use crate::sequence::{Sequence, SequenceIter, SequenceStream};
    pub use crate::source::{IntoSource, Source};
    pub use crate::step::{Outcome, Pull, PullResult, Step};
}

pub mod combinator;
pub mod error;
pub mod sequence;
pub mod source;
pub mod step;

pub use combinator::Flat;
pub use error::SequenceError;
pub use sequence::{Sequence, SequenceIter, SequenceStream};
pub use source::{IntoSource, Source};
pub use step::{Outcome, OutcomeFuture, Pull, PullResult, Step};
