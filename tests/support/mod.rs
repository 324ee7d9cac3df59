//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use pullars::{IntoSource, Outcome, Pull, PullResult, SequenceError, Source, Step};

/// Unwraps an outcome expected to have resolved on the synchronous path.
pub fn ready_value<T>(outcome: Outcome<T>) -> T {
    outcome
        .into_ready()
        .expect("outcome unexpectedly deferred")
        .expect("outcome unexpectedly failed")
}

/// A future that reports pending once, wakes itself, then resolves.
#[derive(Default)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            context.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// A source that suspends on every pull, yielding its items from the
/// asynchronous continuation only.
pub struct DeferredSource<T> {
    items: VecDeque<T>,
}

impl<T> DeferredSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> Source for DeferredSource<T>
where
    T: Send + 'static,
{
    type Item = T;

    fn try_pull(&mut self) -> Pull<T> {
        Pull::Suspended
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<T>> {
        Box::pin(async move {
            YieldNow::default().await;
            match self.items.pop_front() {
                Some(value) => Ok(Step::Value(value)),
                None => Ok(Step::Done),
            }
        })
    }

    fn release(&mut self) {
        self.items.clear();
    }

    fn fail(&mut self, _error: &SequenceError) {}
}

impl<T> IntoSource for DeferredSource<T>
where
    T: Send + 'static,
{
    type Item = T;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

/// Counters observed by a [`ProbeSource`].
#[derive(Clone, Default)]
pub struct ProbeCounters {
    pulls: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl ProbeCounters {
    pub fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

/// A transparent source wrapper counting pulls, releases, and failure
/// notifications that reach it.
pub struct ProbeSource<S> {
    inner: S,
    counters: ProbeCounters,
}

impl<S> ProbeSource<S>
where
    S: Source,
{
    pub fn new(inner: S) -> (Self, ProbeCounters) {
        let counters = ProbeCounters::default();
        (
            Self {
                inner,
                counters: counters.clone(),
            },
            counters,
        )
    }
}

impl<S> Source for ProbeSource<S>
where
    S: Source,
{
    type Item = S::Item;

    fn try_pull(&mut self) -> Pull<Self::Item> {
        self.counters.pulls.fetch_add(1, Ordering::SeqCst);
        self.inner.try_pull()
    }

    fn pull(&mut self) -> BoxFuture<'_, PullResult<Self::Item>> {
        self.counters.pulls.fetch_add(1, Ordering::SeqCst);
        self.inner.pull()
    }

    fn release(&mut self) {
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
        self.inner.release();
    }

    fn fail(&mut self, error: &SequenceError) {
        self.counters.failures.fetch_add(1, Ordering::SeqCst);
        self.inner.fail(error);
    }
}

impl<S> IntoSource for ProbeSource<S>
where
    S: Source,
{
    type Item = S::Item;
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

/// Builds a probed in-memory source.
pub fn probed_vec<T>(items: Vec<T>) -> (ProbeSource<impl Source<Item = T>>, ProbeCounters)
where
    T: Send + 'static,
{
    ProbeSource::new(items.into_source())
}

/// Builds a probed fallible source.
pub fn probed_results<T>(
    items: Vec<Result<T, SequenceError>>,
) -> (ProbeSource<impl Source<Item = T>>, ProbeCounters)
where
    T: Send + 'static,
{
    ProbeSource::new(pullars::Sequence::from_try_iter(items.into_iter()).into_inner())
}
