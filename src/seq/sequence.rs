//! The core Sequence trait: the pull protocol everything else is built on.

use std::future::Future;
use std::ops::DerefMut;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An asynchronous sequence: an ordered, single-pass series of elements
/// realized over time.
///
/// This is the async equivalent of `Iterator`. Each call to `poll_next`
/// attempts to pull out the next element, returning `Poll::Pending` if the
/// element is not yet ready, `Poll::Ready(Some(item))` if one is available,
/// or `Poll::Ready(None)` if the sequence is exhausted.
///
/// # Contract
///
/// - At most one pull is in flight on a given sequence at any time; the pull
///   handle is exclusively owned by whichever component drives it.
/// - Exhaustion is sticky: once `poll_next` returns `Poll::Ready(None)`,
///   every subsequent call must also return `Poll::Ready(None)`.
/// - Elements are never pushed back once yielded. A combinator needing
///   lookahead buffers it internally.
///
/// # Examples
///
/// ```ignore
/// use aseq::{Sequence, SequenceExt};
///
/// async fn drain<S: Sequence<Item = i32> + Unpin>(mut seq: S) {
///     while let Some(item) = seq.next().await {
///         println!("got: {}", item);
///     }
/// }
/// ```
pub trait Sequence {
    /// The type of elements yielded by the sequence.
    type Item;

    /// Attempt to pull out the next element of this sequence.
    ///
    /// # Return value
    ///
    /// - `Poll::Pending` means the next element is not ready yet.
    /// - `Poll::Ready(Some(item))` means `item` is ready and the sequence may
    ///   have more.
    /// - `Poll::Ready(None)` means the sequence is exhausted.
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>>;

    /// Returns the bounds on the remaining length of the sequence.
    ///
    /// The default implementation returns `(0, None)` which is correct for
    /// any sequence.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

// Implement Sequence for Pin<P> where P derefs to a Sequence
impl<P> Sequence for Pin<P>
where
    P: DerefMut + Unpin,
    P::Target: Sequence,
{
    type Item = <P::Target as Sequence>::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().as_mut().poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

// Implement Sequence for Box<S> where S is a Sequence
impl<S: Sequence + Unpin + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut **self).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

// Implement Sequence for &mut S where S is a Sequence
impl<S: Sequence + Unpin + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut **self).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

/// A future that performs exactly one pull on a sequence.
///
/// Created by [`SequenceExt::next`](super::SequenceExt::next). Resolves to
/// `Some(item)` or `None` at exhaustion.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Pull<'a, S: ?Sized> {
    seq: &'a mut S,
}

impl<'a, S: ?Sized> Pull<'a, S> {
    pub(crate) fn new(seq: &'a mut S) -> Self {
        Self { seq }
    }
}

impl<S: ?Sized + Unpin> Unpin for Pull<'_, S> {}

impl<S> Future for Pull<'_, S>
where
    S: Sequence + Unpin + ?Sized,
{
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut *self.seq).poll_next(cx)
    }
}
