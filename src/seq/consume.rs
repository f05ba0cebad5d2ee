//! Positional consumers: first, last, only, emptiness, and length.

use super::Sequence;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future for [`SequenceExt::first`](super::SequenceExt::first).
///
/// Pulls exactly once; resolves to that element or `None`.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct First<S> {
    seq: S,
}

impl<S> First<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq }
    }
}

impl<S: Unpin> Unpin for First<S> {}

impl<S: Sequence + Unpin> Future for First<S> {
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        Pin::new(&mut self.seq).poll_next(cx)
    }
}

/// Future for [`SequenceExt::last`](super::SequenceExt::last).
///
/// Pulls to exhaustion, retaining only the most recent element.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Last<S: Sequence> {
    seq: S,
    latest: Option<S::Item>,
}

impl<S: Sequence> Last<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq, latest: None }
    }
}

impl<S: Sequence + Unpin> Unpin for Last<S> {}

impl<S: Sequence + Unpin> Future for Last<S> {
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => self.latest = Some(item),
                Poll::Ready(None) => return Poll::Ready(self.latest.take()),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::only`](super::SequenceExt::only).
///
/// Resolves to the sole element of a one-element sequence, else `None`.
/// Pulls at most twice: once for the candidate, once to prove it has no
/// successor. A second element resolves `None` without a third pull.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Only<S: Sequence> {
    seq: S,
    candidate: Option<S::Item>,
    pulled: bool,
}

impl<S: Sequence> Only<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self {
            seq,
            candidate: None,
            pulled: false,
        }
    }
}

impl<S: Sequence + Unpin> Unpin for Only<S> {}

impl<S: Sequence + Unpin> Future for Only<S> {
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        if !self.pulled {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    self.candidate = Some(item);
                    self.pulled = true;
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }

        match Pin::new(&mut self.seq).poll_next(cx) {
            Poll::Ready(Some(_)) => Poll::Ready(None),
            Poll::Ready(None) => Poll::Ready(self.candidate.take()),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Future for [`SequenceExt::is_empty`](super::SequenceExt::is_empty) and
/// [`SequenceExt::is_not_empty`](super::SequenceExt::is_not_empty).
///
/// Pulls exactly once.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct IsEmpty<S> {
    seq: S,
    invert: bool,
}

impl<S> IsEmpty<S> {
    pub(crate) fn new(seq: S, invert: bool) -> Self {
        Self { seq, invert }
    }
}

impl<S: Unpin> Unpin for IsEmpty<S> {}

impl<S: Sequence + Unpin> Future for IsEmpty<S> {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        match Pin::new(&mut self.seq).poll_next(cx) {
            Poll::Ready(head) => Poll::Ready(head.is_none() != self.invert),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Future for [`SequenceExt::count`](super::SequenceExt::count).
///
/// Pulls to exhaustion, counting elements.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Count<S> {
    seq: S,
    count: usize,
}

impl<S> Count<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq, count: 0 }
    }
}

impl<S: Unpin> Unpin for Count<S> {}

impl<S: Sequence + Unpin> Future for Count<S> {
    type Output = usize;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<usize> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(_)) => self.count += 1,
                Poll::Ready(None) => return Poll::Ready(self.count),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
