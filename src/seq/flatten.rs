//! Flattening combinators for sequences of sequences.

use super::Sequence;
use super::map::Map;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that concatenates the inner sequences of a sequence of
/// sequences.
///
/// Created by [`SequenceExt::flatten`](super::SequenceExt::flatten). Each
/// inner sequence is fully exhausted, in order, before the next outer
/// element is requested; empty inner sequences contribute nothing.
#[must_use = "sequences do nothing unless polled"]
pub struct Flatten<S, Inner> {
    outer: S,
    inner: Option<Inner>,
    done: bool,
}

impl<S, Inner> Flatten<S, Inner> {
    pub(crate) fn new(outer: S) -> Self {
        Self {
            outer,
            inner: None,
            done: false,
        }
    }
}

impl<S: Unpin, Inner: Unpin> Unpin for Flatten<S, Inner> {}

impl<S, Inner> fmt::Debug for Flatten<S, Inner>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flatten")
            .field("outer", &self.outer)
            .field("inner_active", &self.inner.is_some())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<S, Inner> Sequence for Flatten<S, Inner>
where
    S: Sequence<Item = Inner> + Unpin,
    Inner: Sequence + Unpin,
{
    type Item = Inner::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                match Pin::new(inner).poll_next(cx) {
                    Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                    Poll::Ready(None) => {
                        self.inner = None;
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if self.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut self.outer).poll_next(cx) {
                Poll::Ready(Some(inner)) => self.inner = Some(inner),
                Poll::Ready(None) => {
                    self.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// A sequence that maps each element to a sub-sequence and flattens the
/// results in order.
///
/// Created by [`SequenceExt::flat_map`](super::SequenceExt::flat_map).
/// Equivalent to `seq.map(f).flatten()`.
#[must_use = "sequences do nothing unless polled"]
pub struct FlatMap<S, F, Fut: Future> {
    inner: Flatten<Map<S, F, Fut>, Fut::Output>,
}

impl<S, F, Fut: Future> FlatMap<S, F, Fut> {
    pub(crate) fn new(seq: S, f: F) -> Self {
        Self {
            inner: Flatten::new(Map::new(seq, f)),
        }
    }
}

impl<S: Unpin, F, Fut: Future> Unpin for FlatMap<S, F, Fut> where Fut::Output: Unpin {}

impl<S, F, Fut: Future> fmt::Debug for FlatMap<S, F, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatMap").finish_non_exhaustive()
    }
}

impl<S, F, Fut> Sequence for FlatMap<S, F, Fut>
where
    S: Sequence + Unpin,
    F: FnMut(S::Item, usize) -> Fut,
    Fut: Future,
    Fut::Output: Sequence + Unpin,
{
    type Item = <Fut::Output as Sequence>::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
