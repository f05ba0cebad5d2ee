//! Map combinator for sequences.
//!
//! `Map` transforms each element through a caller-supplied selector, awaiting
//! the selector's result before yielding it.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that yields `f(element, index)` for each source element.
///
/// Created by [`SequenceExt::map`](super::SequenceExt::map). The selector may
/// suspend; its result is always awaited before the mapped element is
/// yielded, so at most one selector invocation is in flight at a time.
#[must_use = "sequences do nothing unless polled"]
pub struct Map<S, F, Fut> {
    seq: S,
    f: F,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
    done: bool,
}

impl<S, F, Fut> Map<S, F, Fut> {
    pub(crate) fn new(seq: S, f: F) -> Self {
        Self {
            seq,
            f,
            index: 0,
            in_flight: None,
            done: false,
        }
    }
}

impl<S: Unpin, F, Fut> Unpin for Map<S, F, Fut> {}

impl<S, F, Fut> fmt::Debug for Map<S, F, Fut>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("seq", &self.seq)
            .field("index", &self.index)
            .field("in_flight", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, F, Fut, B> Sequence for Map<S, F, Fut>
where
    S: Sequence + Unpin,
    F: FnMut(S::Item, usize) -> Fut,
    Fut: Future<Output = B>,
{
    type Item = B;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<B>> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(mapped) => {
                        self.in_flight = None;
                        return Poll::Ready(Some(mapped));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let index = self.index;
                    self.index += 1;
                    let fut = (self.f)(item, index);
                    self.in_flight = Some(Box::pin(fut));
                }
                Poll::Ready(None) => {
                    self.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        let in_flight = usize::from(self.in_flight.is_some());
        (
            lower.saturating_add(in_flight),
            upper.and_then(|u| u.checked_add(in_flight)),
        )
    }
}
