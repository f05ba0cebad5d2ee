//! Filter combinators: predicate filtering, equality removal, and
//! `Option`-flattening.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that yields elements for which a predicate holds.
///
/// Created by [`SequenceExt::filter`](super::SequenceExt::filter) and, with
/// the predicate's result negated, by
/// [`SequenceExt::exclude`](super::SequenceExt::exclude). The predicate is
/// called with `(element, index)` and may suspend.
#[must_use = "sequences do nothing unless polled"]
pub struct Filter<S: Sequence, P, Fut> {
    seq: S,
    pred: P,
    invert: bool,
    index: usize,
    pending: Option<(S::Item, Pin<Box<Fut>>)>,
    done: bool,
}

impl<S: Sequence, P, Fut> Filter<S, P, Fut> {
    pub(crate) fn new(seq: S, pred: P, invert: bool) -> Self {
        Self {
            seq,
            pred,
            invert,
            index: 0,
            pending: None,
            done: false,
        }
    }
}

impl<S: Sequence + Unpin, P, Fut> Unpin for Filter<S, P, Fut> {}

impl<S, P, Fut> fmt::Debug for Filter<S, P, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("seq", &self.seq)
            .field("invert", &self.invert)
            .field("index", &self.index)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Sequence for Filter<S, P, Fut>
where
    S: Sequence + Unpin,
    P: FnMut(&S::Item, usize) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some((_, fut)) = self.pending.as_mut() {
                let verdict = match fut.as_mut().poll(cx) {
                    Poll::Ready(keep) => keep,
                    Poll::Pending => return Poll::Pending,
                };
                let (item, _) = self.pending.take().expect("pending entry checked above");
                if verdict != self.invert {
                    return Poll::Ready(Some(item));
                }
                continue;
            }

            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let index = self.index;
                    self.index += 1;
                    let fut = Box::pin((self.pred)(&item, index));
                    self.pending = Some((item, fut));
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
        // Every element may be rejected; only the upper bound survives.
        let (_, upper) = self.seq.size_hint();
        let pending = usize::from(self.pending.is_some());
        (0, upper.and_then(|u| u.checked_add(pending)))
    }
}

/// A sequence that removes every element equal to a given value.
///
/// Created by [`SequenceExt::remove`](super::SequenceExt::remove). Unlike
/// [`RemoveFirst`], all occurrences are removed, not just the first.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct Remove<S: Sequence> {
    seq: S,
    target: S::Item,
}

impl<S: Sequence> Remove<S> {
    pub(crate) fn new(seq: S, target: S::Item) -> Self {
        Self { seq, target }
    }
}

impl<S: Sequence + Unpin> Unpin for Remove<S> {}

impl<S> Sequence for Remove<S>
where
    S: Sequence + Unpin,
    S::Item: PartialEq,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if item != self.target {
                        return Poll::Ready(Some(item));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.seq.size_hint();
        (0, upper)
    }
}

/// A sequence over `Option` elements that drops every `None` and unwraps the
/// rest.
///
/// Created by [`SequenceExt::exclude_none`](super::SequenceExt::exclude_none).
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct ExcludeNone<S> {
    seq: S,
}

impl<S> ExcludeNone<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq }
    }
}

impl<S: Unpin> Unpin for ExcludeNone<S> {}

impl<S, T> Sequence for ExcludeNone<S>
where
    S: Sequence<Item = Option<T>> + Unpin,
{
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(Some(item))) => return Poll::Ready(Some(item)),
                Poll::Ready(Some(None)) => {}
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.seq.size_hint();
        (0, upper)
    }
}
