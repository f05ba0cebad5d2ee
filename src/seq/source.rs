//! Source adapters: normalize accepted input shapes into sequences.
//!
//! Four shapes are accepted at the boundary: a native [`Sequence`], a
//! synchronous collection ([`iter`]), a collection of pending elements
//! ([`resolved`]), and a pending wrapper around a sequence ([`deferred`]).
//! Normalization is lazy in every case: nothing is walked, awaited, or
//! resolved until the first pull.

use super::Sequence;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence that yields items from a synchronous iterator.
///
/// Created by the [`iter`] function.
#[derive(Debug)]
pub struct Iter<I> {
    iter: std::iter::Fuse<I>,
}

impl<I> Unpin for Iter<I> {}

impl<I: Iterator> Sequence for Iter<I> {
    type Item = I::Item;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.iter.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Convert a synchronous collection into a sequence.
///
/// The resulting sequence yields elements in place (always returning
/// `Poll::Ready`). The iterator is fused so that exhaustion is sticky even
/// for iterators that would otherwise resume.
///
/// # Examples
///
/// ```ignore
/// use aseq::{iter, SequenceExt};
///
/// let seq = iter(vec![1, 2, 3]);
/// // seq.next().await returns Some(1), Some(2), Some(3), None
/// ```
pub fn iter<I>(collection: I) -> Iter<I::IntoIter>
where
    I: IntoIterator,
{
    Iter {
        iter: collection.into_iter().fuse(),
    }
}

/// A sequence that yields exactly one element.
///
/// Created by the [`once`] function; also the building block for
/// [`push`](super::SequenceExt::push) and [`unshift`](super::SequenceExt::unshift).
#[derive(Debug)]
pub struct Once<T> {
    item: Option<T>,
}

impl<T> Unpin for Once<T> {}

impl<T> Sequence for Once<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<T>> {
        Poll::Ready(self.item.take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.item.is_some());
        (n, Some(n))
    }
}

/// A sequence with exactly one element.
pub fn once<T>(item: T) -> Once<T> {
    Once { item: Some(item) }
}

/// A sequence over a collection of pending elements.
///
/// Created by the [`resolved`] function. Each element is awaited as its
/// position is reached, one at a time, in order; elements past the current
/// position are never started early.
#[must_use = "sequences do nothing unless polled"]
pub struct Resolved<I: Iterator>
where
    I::Item: Future,
{
    iter: std::iter::Fuse<I>,
    in_flight: Option<Pin<Box<I::Item>>>,
}

impl<I: Iterator> Unpin for Resolved<I> where I::Item: Future {}

impl<I: Iterator> std::fmt::Debug for Resolved<I>
where
    I::Item: Future,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("in_flight", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl<I: Iterator> Sequence for Resolved<I>
where
    I::Item: Future,
{
    type Item = <I::Item as Future>::Output;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(item) => {
                        self.in_flight = None;
                        return Poll::Ready(Some(item));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match self.iter.next() {
                Some(fut) => self.in_flight = Some(Box::pin(fut)),
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let in_flight = usize::from(self.in_flight.is_some());
        (
            lower.saturating_add(in_flight),
            upper.and_then(|u| u.checked_add(in_flight)),
        )
    }
}

/// Convert a collection of pending elements into a sequence.
///
/// Elements are awaited strictly one at a time, in order, as the consumer
/// reaches them — never all at once up front.
pub fn resolved<I>(collection: I) -> Resolved<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Future,
{
    Resolved {
        iter: collection.into_iter().fuse(),
        in_flight: None,
    }
}

/// A sequence behind a pending wrapper.
///
/// Created by the [`deferred`] function. The wrapper future is resolved
/// exactly once, lazily, when the first pull arrives; after that, pulls are
/// forwarded to the inner sequence.
#[must_use = "sequences do nothing unless polled"]
pub struct Deferred<Fut: Future> {
    wrapper: Option<Pin<Box<Fut>>>,
    inner: Option<Fut::Output>,
}

impl<Fut: Future> Unpin for Deferred<Fut> where Fut::Output: Unpin {}

impl<Fut: Future> std::fmt::Debug for Deferred<Fut> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("resolved", &self.inner.is_some())
            .finish_non_exhaustive()
    }
}

impl<Fut> Sequence for Deferred<Fut>
where
    Fut: Future,
    Fut::Output: Sequence + Unpin,
{
    type Item = <Fut::Output as Sequence>::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                return Pin::new(inner).poll_next(cx);
            }

            let wrapper = self
                .wrapper
                .as_mut()
                .expect("Deferred polled after wrapper was consumed without a sequence");
            match wrapper.as_mut().poll(cx) {
                Poll::Ready(seq) => {
                    self.wrapper = None;
                    self.inner = Some(seq);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, None), Sequence::size_hint)
    }
}

/// Convert a pending wrapper around a sequence into a sequence.
///
/// The wrapper is not awaited at call time; it is resolved exactly once when
/// iteration begins.
///
/// # Examples
///
/// ```ignore
/// use aseq::{deferred, iter, SequenceExt};
///
/// let seq = deferred(async { iter(vec![1, 2, 3]) });
/// assert_eq!(seq.to_vec().await, vec![1, 2, 3]);
/// ```
pub fn deferred<Fut>(wrapper: Fut) -> Deferred<Fut>
where
    Fut: Future,
    Fut::Output: Sequence + Unpin,
{
    Deferred {
        wrapper: Some(Box::pin(wrapper)),
        inner: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::task::{Wake, Waker};

    struct NoopWaker;

    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    fn noop_waker() -> Waker {
        Waker::from(Arc::new(NoopWaker))
    }

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn iter_from_vec() {
        init_test("iter_from_vec");
        let mut seq = iter(vec![1, 2, 3]);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(1)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(1))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(2)));
        crate::assert_with_log!(ok, "pull 2", "Poll::Ready(Some(2))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(3)));
        crate::assert_with_log!(ok, "pull 3", "Poll::Ready(Some(3))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(None));
        crate::assert_with_log!(ok, "pull done", "Poll::Ready(None)", poll);
        crate::test_complete!("iter_from_vec");
    }

    #[test]
    fn iter_exhaustion_is_sticky() {
        init_test("iter_exhaustion_is_sticky");
        // An iterator that would resume after None if not fused.
        struct Blinker(u8);
        impl Iterator for Blinker {
            type Item = u8;
            fn next(&mut self) -> Option<u8> {
                self.0 += 1;
                if self.0 % 2 == 0 { None } else { Some(self.0) }
            }
        }

        let mut seq = iter(Blinker(0));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(1)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(1))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(None));
        crate::assert_with_log!(ok, "pull end", "Poll::Ready(None)", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(None));
        crate::assert_with_log!(ok, "pull after end", "Poll::Ready(None)", poll);
        crate::test_complete!("iter_exhaustion_is_sticky");
    }

    #[test]
    fn iter_size_hint() {
        init_test("iter_size_hint");
        let seq = iter(vec![1, 2, 3]);
        let hint = seq.size_hint();
        let ok = hint == (3, Some(3));
        crate::assert_with_log!(ok, "size hint", (3, Some(3)), hint);
        crate::test_complete!("iter_size_hint");
    }

    #[test]
    fn once_yields_single_element() {
        init_test("once_yields_single_element");
        let mut seq = once(42);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let hint = seq.size_hint();
        let ok = hint == (1, Some(1));
        crate::assert_with_log!(ok, "size hint", (1, Some(1)), hint);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(42)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(42))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(None));
        crate::assert_with_log!(ok, "pull done", "Poll::Ready(None)", poll);
        crate::test_complete!("once_yields_single_element");
    }

    #[test]
    fn resolved_awaits_in_order() {
        init_test("resolved_awaits_in_order");
        let mut seq = resolved(vec![
            std::future::ready(1),
            std::future::ready(2),
            std::future::ready(3),
        ]);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(1)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(1))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(2)));
        crate::assert_with_log!(ok, "pull 2", "Poll::Ready(Some(2))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(3)));
        crate::assert_with_log!(ok, "pull 3", "Poll::Ready(Some(3))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(None));
        crate::assert_with_log!(ok, "pull done", "Poll::Ready(None)", poll);
        crate::test_complete!("resolved_awaits_in_order");
    }

    #[test]
    fn resolved_starts_elements_lazily() {
        init_test("resolved_starts_elements_lazily");
        use std::cell::Cell;
        use std::rc::Rc;

        // Each future records when it first gets polled.
        struct Tracked {
            id: u8,
            started: Rc<Cell<u8>>,
        }
        impl Future for Tracked {
            type Output = u8;
            fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<u8> {
                self.started.set(self.started.get().max(self.id));
                Poll::Ready(self.id)
            }
        }

        let started = Rc::new(Cell::new(0));
        let mut seq = resolved(vec![
            Tracked {
                id: 1,
                started: started.clone(),
            },
            Tracked {
                id: 2,
                started: started.clone(),
            },
        ]);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(1)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(1))", poll);
        // The second element has not been started yet.
        let high_water = started.get();
        let ok = high_water == 1;
        crate::assert_with_log!(ok, "second element untouched", 1, high_water);
        crate::test_complete!("resolved_starts_elements_lazily");
    }

    #[test]
    fn deferred_resolves_on_first_pull() {
        init_test("deferred_resolves_on_first_pull");
        let mut seq = deferred(std::future::ready(iter(vec![1, 2])));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(1)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(1))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(2)));
        crate::assert_with_log!(ok, "pull 2", "Poll::Ready(Some(2))", poll);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(None));
        crate::assert_with_log!(ok, "pull done", "Poll::Ready(None)", poll);
        crate::test_complete!("deferred_resolves_on_first_pull");
    }

    #[test]
    fn deferred_is_lazy_at_construction() {
        init_test("deferred_is_lazy_at_construction");
        use std::cell::Cell;
        use std::rc::Rc;

        let resolved_flag = Rc::new(Cell::new(false));
        let flag = resolved_flag.clone();
        struct MarkOnPoll {
            flag: Rc<Cell<bool>>,
        }
        impl Future for MarkOnPoll {
            type Output = Iter<std::vec::IntoIter<i32>>;
            fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
                self.flag.set(true);
                Poll::Ready(iter(vec![9]))
            }
        }

        let mut seq = deferred(MarkOnPoll { flag });
        let untouched = !resolved_flag.get();
        crate::assert_with_log!(untouched, "wrapper untouched before pull", true, untouched);

        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let poll = Pin::new(&mut seq).poll_next(&mut cx);
        let ok = matches!(poll, Poll::Ready(Some(9)));
        crate::assert_with_log!(ok, "pull 1", "Poll::Ready(Some(9))", poll);
        let touched = resolved_flag.get();
        crate::assert_with_log!(touched, "wrapper resolved after pull", true, touched);
        crate::test_complete!("deferred_is_lazy_at_construction");
    }
}
