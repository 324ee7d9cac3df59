//! The asynchronous enumeration entry point.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures::future::BoxFuture;
use pin_project_lite::pin_project;

use crate::error::SequenceError;
use crate::source::Source;
use crate::step::{Pull, PullResult, Step};

pin_project! {
    /// A [`Stream`] over a sequence, by the caller's declared intent to go
    /// asynchronous.
    ///
    /// Each element is still attempted synchronously first, so an
    /// all-synchronous chain polls ready on every element. When a pull
    /// suspends, the source moves into the in-flight future and is handed
    /// back with the step — an ownership-threading state machine, so the
    /// stream stays safe without self-reference.
    ///
    /// The stream ends after the first failed pull.
    pub struct SequenceStream<S>
    where
        S: Source,
    {
        state: StreamState<S>,
    }
}

enum StreamState<S>
where
    S: Source,
{
    Idle(S),
    Pulling(BoxFuture<'static, (PullResult<S::Item>, S)>),
    Finished,
}

impl<S> SequenceStream<S>
where
    S: Source + 'static,
{
    pub(crate) fn new(source: S) -> Self {
        Self {
            state: StreamState::Idle(source),
        }
    }
}

async fn pull_owned<S>(mut source: S) -> (PullResult<S::Item>, S)
where
    S: Source,
{
    let result = source.pull().await;
    (result, source)
}

impl<S> Stream for SequenceStream<S>
where
    S: Source + 'static,
{
    type Item = Result<S::Item, SequenceError>;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let state = self.project().state;
        loop {
            match std::mem::replace(state, StreamState::Finished) {
                StreamState::Finished => return Poll::Ready(None),
                StreamState::Idle(mut source) => match source.try_pull() {
                    Pull::Ready(Ok(Step::Value(value))) => {
                        *state = StreamState::Idle(source);
                        return Poll::Ready(Some(Ok(value)));
                    }
                    Pull::Ready(Ok(Step::Done)) => return Poll::Ready(None),
                    Pull::Ready(Err(error)) => {
                        source.fail(&error);
                        return Poll::Ready(Some(Err(error)));
                    }
                    Pull::Suspended => {
                        *state = StreamState::Pulling(Box::pin(pull_owned(source)));
                    }
                },
                StreamState::Pulling(mut future) => match future.as_mut().poll(context) {
                    Poll::Pending => {
                        *state = StreamState::Pulling(future);
                        return Poll::Pending;
                    }
                    Poll::Ready((result, mut source)) => match result {
                        Ok(Step::Value(value)) => {
                            *state = StreamState::Idle(source);
                            return Poll::Ready(Some(Ok(value)));
                        }
                        Ok(Step::Done) => return Poll::Ready(None),
                        Err(error) => {
                            source.fail(&error);
                            return Poll::Ready(Some(Err(error)));
                        }
                    },
                },
            }
        }
    }
}
