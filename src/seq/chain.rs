//! Chain combinator: one sequence followed by another.
//!
//! `Chain` is the building block for `prepend`, `push`, and `unshift` as
//! well as plain concatenation of two sequences.

use super::Sequence;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that yields every element of the first sequence, then every
/// element of the second.
///
/// Created by [`SequenceExt::chain`](super::SequenceExt::chain),
/// [`SequenceExt::prepend`](super::SequenceExt::prepend),
/// [`SequenceExt::push`](super::SequenceExt::push), and
/// [`SequenceExt::unshift`](super::SequenceExt::unshift).
///
/// The second sequence is not pulled until the first is exhausted.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct Chain<S1, S2> {
    first: Option<S1>,
    second: S2,
}

impl<S1, S2> Chain<S1, S2> {
    pub(crate) fn new(first: S1, second: S2) -> Self {
        Self {
            first: Some(first),
            second,
        }
    }

    /// Consumes the combinator, returning the underlying sequences.
    ///
    /// The first sequence is `None` once it has been exhausted.
    pub fn into_inner(self) -> (Option<S1>, S2) {
        (self.first, self.second)
    }
}

impl<S1: Unpin, S2: Unpin> Unpin for Chain<S1, S2> {}

impl<S1, S2> Sequence for Chain<S1, S2>
where
    S1: Sequence + Unpin,
    S2: Sequence<Item = S1::Item> + Unpin,
{
    type Item = S1::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(first) = self.first.as_mut() {
            match Pin::new(first).poll_next(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => {
                    self.first = None;
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        Pin::new(&mut self.second).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let second_hint = self.second.size_hint();
        let Some(first) = self.first.as_ref() else {
            return second_hint;
        };

        let (first_lower, first_upper) = first.size_hint();
        let (second_lower, second_upper) = second_hint;

        let lower = first_lower.saturating_add(second_lower);
        let upper = match (first_upper, second_upper) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };

        (lower, upper)
    }
}
