//! Single-occurrence removal combinators.
//!
//! `ExcludeFirst` and `RemoveFirst` skip exactly one element — the first one
//! matching a predicate or equal to a value. Every later element, including
//! further matches, is forwarded unchanged. Whole-run removal lives in
//! [`Filter`](super::Filter) and [`Remove`](super::Remove).

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that skips the first element matching a predicate.
///
/// Created by
/// [`SequenceExt::exclude_first`](super::SequenceExt::exclude_first). Once
/// the match has been skipped, the predicate is never consulted again.
#[must_use = "sequences do nothing unless polled"]
pub struct ExcludeFirst<S: Sequence, P, Fut> {
    seq: S,
    pred: P,
    removed: bool,
    pending: Option<(S::Item, Pin<Box<Fut>>)>,
}

impl<S: Sequence, P, Fut> ExcludeFirst<S, P, Fut> {
    pub(crate) fn new(seq: S, pred: P) -> Self {
        Self {
            seq,
            pred,
            removed: false,
            pending: None,
        }
    }
}

impl<S: Sequence + Unpin, P, Fut> Unpin for ExcludeFirst<S, P, Fut> {}

impl<S, P, Fut> fmt::Debug for ExcludeFirst<S, P, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeFirst")
            .field("seq", &self.seq)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Sequence for ExcludeFirst<S, P, Fut>
where
    S: Sequence + Unpin,
    P: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some((_, fut)) = self.pending.as_mut() {
                let matched = match fut.as_mut().poll(cx) {
                    Poll::Ready(matched) => matched,
                    Poll::Pending => return Poll::Pending,
                };
                let (item, _) = self.pending.take().expect("pending entry checked above");
                if matched {
                    // The one removal; everything after passes through.
                    self.removed = true;
                    continue;
                }
                return Poll::Ready(Some(item));
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if self.removed {
                        return Poll::Ready(Some(item));
                    }
                    let fut = Box::pin((self.pred)(&item));
                    self.pending = Some((item, fut));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        let pending = usize::from(self.pending.is_some());
        if self.removed {
            (
                lower.saturating_add(pending),
                upper.and_then(|u| u.checked_add(pending)),
            )
        } else {
            (
                lower.saturating_add(pending).saturating_sub(1),
                upper.and_then(|u| u.checked_add(pending)),
            )
        }
    }
}

/// A sequence that skips the first element equal to a given value.
///
/// Created by
/// [`SequenceExt::remove_first`](super::SequenceExt::remove_first). Later
/// elements equal to the value are forwarded unchanged; compare
/// [`Remove`](super::Remove), which drops every occurrence.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct RemoveFirst<S: Sequence> {
    seq: S,
    target: S::Item,
    removed: bool,
}

impl<S: Sequence> RemoveFirst<S> {
    pub(crate) fn new(seq: S, target: S::Item) -> Self {
        Self {
            seq,
            target,
            removed: false,
        }
    }
}

impl<S: Sequence + Unpin> Unpin for RemoveFirst<S> {}

impl<S> Sequence for RemoveFirst<S>
where
    S: Sequence + Unpin,
    S::Item: PartialEq,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if !self.removed && item == self.target {
                        self.removed = true;
                        continue;
                    }
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        if self.removed {
            (lower, upper)
        } else {
            (lower.saturating_sub(1), upper)
        }
    }
}
