//! Initial combinator: all elements except the last.

use super::Sequence;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that yields every element of its source except the last.
///
/// Created by [`SequenceExt::initial`](super::SequenceExt::initial).
///
/// Requires one element of lookahead: the most recently pulled element is
/// held back and only yielded once a further pull proves a successor exists.
/// When the source is exhausted, the held element is discarded. Empty and
/// one-element sources yield an empty sequence.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct Initial<S: Sequence> {
    seq: S,
    held: Option<S::Item>,
    done: bool,
}

impl<S: Sequence> Initial<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self {
            seq,
            held: None,
            done: false,
        }
    }
}

impl<S: Sequence + Unpin> Unpin for Initial<S> {}

impl<S: Sequence + Unpin> Sequence for Initial<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if let Some(prev) = self.held.replace(item) {
                        // A successor exists, so prev is not the last element.
                        return Poll::Ready(Some(prev));
                    }
                }
                Poll::Ready(None) => {
                    // The held element was the last one; drop it.
                    self.held = None;
                    self.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        let held = usize::from(self.held.is_some());
        (
            lower.saturating_add(held).saturating_sub(1),
            upper.map(|u| u.saturating_add(held).saturating_sub(1)),
        )
    }
}
