//! Prefix and suffix selection combinators: `take`, `skip`, and their
//! predicate-driven variants.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that yields at most `n` elements of its source.
///
/// Created by [`SequenceExt::take`](super::SequenceExt::take). Never pulls
/// past the `n`-th element; `take(0)` never pulls at all.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct Take<S> {
    seq: S,
    remaining: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(seq: S, n: usize) -> Self {
        Self { seq, remaining: n }
    }
}

impl<S: Unpin> Unpin for Take<S> {}

impl<S: Sequence + Unpin> Sequence for Take<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.remaining == 0 {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.seq).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                self.remaining -= 1;
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                self.remaining = 0;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        let lower = lower.min(self.remaining);
        let upper = upper.map_or(self.remaining, |u| u.min(self.remaining));
        (lower, Some(upper))
    }
}

/// A sequence that discards the first `n` elements of its source.
///
/// Created by [`SequenceExt::skip`](super::SequenceExt::skip) and, with
/// `n = 1`, by [`SequenceExt::tail`](super::SequenceExt::tail). A source
/// shorter than `n` yields an empty sequence.
#[derive(Debug)]
#[must_use = "sequences do nothing unless polled"]
pub struct Skip<S> {
    seq: S,
    remaining: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(seq: S, n: usize) -> Self {
        Self { seq, remaining: n }
    }
}

impl<S: Unpin> Unpin for Skip<S> {}

impl<S: Sequence + Unpin> Sequence for Skip<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if self.remaining == 0 {
                        return Poll::Ready(Some(item));
                    }
                    self.remaining -= 1;
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        (
            lower.saturating_sub(self.remaining),
            upper.map(|u| u.saturating_sub(self.remaining)),
        )
    }
}

/// A sequence that yields elements while a predicate holds, then stops
/// permanently.
///
/// Created by [`SequenceExt::take_while`](super::SequenceExt::take_while) and,
/// with the predicate negated, by
/// [`SequenceExt::take_until`](super::SequenceExt::take_until). The first
/// failing element is consumed and discarded; no further pulls are issued
/// after it, even if a later element would satisfy the predicate again.
#[must_use = "sequences do nothing unless polled"]
pub struct TakeWhile<S: Sequence, P, Fut> {
    seq: S,
    pred: P,
    invert: bool,
    index: usize,
    pending: Option<(S::Item, Pin<Box<Fut>>)>,
    done: bool,
}

impl<S: Sequence, P, Fut> TakeWhile<S, P, Fut> {
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

impl<S: Sequence + Unpin, P, Fut> Unpin for TakeWhile<S, P, Fut> {}

impl<S, P, Fut> fmt::Debug for TakeWhile<S, P, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TakeWhile")
            .field("seq", &self.seq)
            .field("invert", &self.invert)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Sequence for TakeWhile<S, P, Fut>
where
    S: Sequence + Unpin,
    P: FnMut(&S::Item, usize) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some((_, fut)) = self.pending.as_mut() {
            let verdict = match fut.as_mut().poll(cx) {
                Poll::Ready(verdict) => verdict,
                Poll::Pending => return Poll::Pending,
            };
            let (item, _) = self.pending.take().expect("pending entry checked above");
            if verdict != self.invert {
                return Poll::Ready(Some(item));
            }
            self.done = true;
            return Poll::Ready(None);
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
                // Re-enter to poll the freshly created predicate future.
                self.poll_next(cx)
            }
            Poll::Ready(None) => {
                self.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (_, upper) = self.seq.size_hint();
        let pending = usize::from(self.pending.is_some());
        (0, upper.and_then(|u| u.checked_add(pending)))
    }
}

/// A sequence that discards a leading run of elements while a predicate
/// holds, then forwards everything from the first failing element onward.
///
/// Created by [`SequenceExt::skip_while`](super::SequenceExt::skip_while) and,
/// with the predicate negated, by
/// [`SequenceExt::skip_until`](super::SequenceExt::skip_until). Later
/// elements that would have matched the predicate are forwarded unchanged;
/// the predicate is never consulted after the run ends.
#[must_use = "sequences do nothing unless polled"]
pub struct SkipWhile<S: Sequence, P, Fut> {
    seq: S,
    pred: P,
    invert: bool,
    index: usize,
    pending: Option<(S::Item, Pin<Box<Fut>>)>,
    skipping: bool,
}

impl<S: Sequence, P, Fut> SkipWhile<S, P, Fut> {
    pub(crate) fn new(seq: S, pred: P, invert: bool) -> Self {
        Self {
            seq,
            pred,
            invert,
            index: 0,
            pending: None,
            skipping: true,
        }
    }
}

impl<S: Sequence + Unpin, P, Fut> Unpin for SkipWhile<S, P, Fut> {}

impl<S, P, Fut> fmt::Debug for SkipWhile<S, P, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipWhile")
            .field("seq", &self.seq)
            .field("invert", &self.invert)
            .field("skipping", &self.skipping)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Sequence for SkipWhile<S, P, Fut>
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
                    Poll::Ready(verdict) => verdict,
                    Poll::Pending => return Poll::Pending,
                };
                let (item, _) = self.pending.take().expect("pending entry checked above");
                if verdict != self.invert {
                    continue;
                }
                // First failing element ends the run and is forwarded.
                self.skipping = false;
                return Poll::Ready(Some(item));
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if !self.skipping {
                        return Poll::Ready(Some(item));
                    }
                    let index = self.index;
                    self.index += 1;
                    let fut = Box::pin((self.pred)(&item, index));
                    self.pending = Some((item, fut));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.seq.size_hint();
        let pending = usize::from(self.pending.is_some());
        (0, upper.and_then(|u| u.checked_add(pending)))
    }
}
