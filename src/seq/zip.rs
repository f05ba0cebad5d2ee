//! Zip combinator: lockstep pairing of two sequences.

use super::Sequence;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that pairs elements of two sequences until either ends.
///
/// Created by [`SequenceExt::zip`](super::SequenceExt::zip). Each step pulls
/// the first sequence, then the second; an element pulled from one side
/// while the other is still pending is buffered, never re-pulled.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct Zip<S1: Sequence, S2: Sequence> {
    first: S1,
    second: S2,
    queued1: Option<S1::Item>,
    queued2: Option<S2::Item>,
}

impl<S1: Sequence, S2: Sequence> Zip<S1, S2> {
    pub(crate) fn new(first: S1, second: S2) -> Self {
        Self {
            first,
            second,
            queued1: None,
            queued2: None,
        }
    }
}

impl<S1: Sequence + Unpin, S2: Sequence + Unpin> Unpin for Zip<S1, S2> {}

impl<S1, S2> Sequence for Zip<S1, S2>
where
    S1: Sequence + Unpin,
    S2: Sequence + Unpin,
{
    type Item = (S1::Item, S2::Item);

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.queued1.is_none() {
            match Pin::new(&mut self.first).poll_next(cx) {
                Poll::Ready(Some(item)) => self.queued1 = Some(item),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => {}
            }
        }

        if self.queued2.is_none() {
            match Pin::new(&mut self.second).poll_next(cx) {
                Poll::Ready(Some(item)) => self.queued2 = Some(item),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => {}
            }
        }

        if self.queued1.is_some() && self.queued2.is_some() {
            let item1 = self.queued1.take().expect("queued1 must be set");
            let item2 = self.queued2.take().expect("queued2 must be set");
            Poll::Ready(Some((item1, item2)))
        } else {
            Poll::Pending
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower1, upper1) = self.first.size_hint();
        let (lower2, upper2) = self.second.size_hint();

        let lower = lower1.min(lower2);
        let upper = match (upper1, upper2) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };

        (lower, upper)
    }
}
