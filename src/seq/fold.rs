//! Fold consumers: thread an accumulator through every element.

use super::Sequence;
use crate::error::EmptySequenceError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future for [`SequenceExt::fold`](super::SequenceExt::fold).
///
/// Pulls every element, threading the accumulator through
/// `f(accumulator, element, index)`. An empty sequence resolves to the seed
/// unchanged.
#[must_use = "futures do nothing unless polled"]
pub struct Fold<S, F, Fut, Acc> {
    seq: S,
    f: F,
    acc: Option<Acc>,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
}

impl<S, F, Fut, Acc> Fold<S, F, Fut, Acc> {
    pub(crate) fn new(seq: S, init: Acc, f: F) -> Self {
        Self {
            seq,
            f,
            acc: Some(init),
            index: 0,
            in_flight: None,
        }
    }
}

impl<S: Unpin, F, Fut, Acc> Unpin for Fold<S, F, Fut, Acc> {}

impl<S, F, Fut, Acc> fmt::Debug for Fold<S, F, Fut, Acc>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fold")
            .field("seq", &self.seq)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S, F, Fut, Acc> Future for Fold<S, F, Fut, Acc>
where
    S: Sequence + Unpin,
    F: FnMut(Acc, S::Item, usize) -> Fut,
    Fut: Future<Output = Acc>,
{
    type Output = Acc;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Acc> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(acc) => {
                        self.in_flight = None;
                        self.acc = Some(acc);
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let acc = self.acc.take().expect("Fold accumulator always present");
                    let index = self.index;
                    self.index += 1;
                    self.in_flight = Some(Box::pin((self.f)(acc, item, index)));
                }
                Poll::Ready(None) => {
                    let acc = self.acc.take().expect("Fold accumulator always present");
                    return Poll::Ready(acc);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::fold1`](super::SequenceExt::fold1).
///
/// Seeds the accumulator from the first element; the reducer then runs for
/// each later element with the index counter starting at 1. An empty
/// sequence resolves to [`EmptySequenceError`].
#[must_use = "futures do nothing unless polled"]
pub struct Fold1<S: Sequence, F, Fut> {
    seq: S,
    f: F,
    acc: Option<S::Item>,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
}

impl<S: Sequence, F, Fut> Fold1<S, F, Fut> {
    pub(crate) fn new(seq: S, f: F) -> Self {
        Self {
            seq,
            f,
            acc: None,
            index: 1,
            in_flight: None,
        }
    }
}

impl<S: Sequence + Unpin, F, Fut> Unpin for Fold1<S, F, Fut> {}

impl<S, F, Fut> fmt::Debug for Fold1<S, F, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fold1")
            .field("seq", &self.seq)
            .field("seeded", &self.acc.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, F, Fut> Future for Fold1<S, F, Fut>
where
    S: Sequence + Unpin,
    F: FnMut(S::Item, S::Item, usize) -> Fut,
    Fut: Future<Output = S::Item>,
{
    type Output = Result<S::Item, EmptySequenceError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(acc) => {
                        self.in_flight = None;
                        self.acc = Some(acc);
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => match self.acc.take() {
                    Some(acc) => {
                        let index = self.index;
                        self.index += 1;
                        self.in_flight = Some(Box::pin((self.f)(acc, item, index)));
                    }
                    None => self.acc = Some(item),
                },
                Poll::Ready(None) => {
                    return Poll::Ready(self.acc.take().ok_or(EmptySequenceError));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
