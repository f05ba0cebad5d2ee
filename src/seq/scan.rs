//! Scan combinators: folds that yield every intermediate accumulator.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence of the intermediate accumulator values of a fold.
///
/// Created by [`SequenceExt::scan`](super::SequenceExt::scan). For a source
/// of length `n` the output also has length `n`; the seed itself is not
/// yielded.
#[must_use = "sequences do nothing unless polled"]
pub struct Scan<S, F, Fut, Acc> {
    seq: S,
    f: F,
    acc: Option<Acc>,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
    done: bool,
}

impl<S, F, Fut, Acc> Scan<S, F, Fut, Acc> {
    pub(crate) fn new(seq: S, init: Acc, f: F) -> Self {
        Self {
            seq,
            f,
            acc: Some(init),
            index: 0,
            in_flight: None,
            done: false,
        }
    }
}

impl<S: Unpin, F, Fut, Acc> Unpin for Scan<S, F, Fut, Acc> {}

impl<S, F, Fut, Acc> fmt::Debug for Scan<S, F, Fut, Acc>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scan")
            .field("seq", &self.seq)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S, F, Fut, Acc> Sequence for Scan<S, F, Fut, Acc>
where
    S: Sequence + Unpin,
    F: FnMut(Acc, S::Item, usize) -> Fut,
    Fut: Future<Output = Acc>,
    Acc: Clone,
{
    type Item = Acc;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Acc>> {
        if let Some(fut) = self.in_flight.as_mut() {
            match fut.as_mut().poll(cx) {
                Poll::Ready(acc) => {
                    self.in_flight = None;
                    self.acc = Some(acc.clone());
                    return Poll::Ready(Some(acc));
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        if self.done {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.seq).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                let acc = self.acc.take().expect("Scan accumulator always present");
                let index = self.index;
                self.index += 1;
                self.in_flight = Some(Box::pin((self.f)(acc, item, index)));
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
        let (lower, upper) = self.seq.size_hint();
        let in_flight = usize::from(self.in_flight.is_some());
        (
            lower.saturating_add(in_flight),
            upper.and_then(|u| u.checked_add(in_flight)),
        )
    }
}

/// A scan seeded from the first element of the source.
///
/// Created by [`SequenceExt::scan1`](super::SequenceExt::scan1). The first
/// element is yielded as the initial accumulator; the reducer then runs for
/// each later element, with the index counter starting at 1. An empty source
/// yields an empty sequence.
#[must_use = "sequences do nothing unless polled"]
pub struct Scan1<S: Sequence, F, Fut> {
    seq: S,
    f: F,
    acc: Option<S::Item>,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
    done: bool,
}

impl<S: Sequence, F, Fut> Scan1<S, F, Fut> {
    pub(crate) fn new(seq: S, f: F) -> Self {
        Self {
            seq,
            f,
            acc: None,
            index: 1,
            in_flight: None,
            done: false,
        }
    }
}

impl<S: Sequence + Unpin, F, Fut> Unpin for Scan1<S, F, Fut> {}

impl<S, F, Fut> fmt::Debug for Scan1<S, F, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scan1")
            .field("seq", &self.seq)
            .field("seeded", &self.acc.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, F, Fut> Sequence for Scan1<S, F, Fut>
where
    S: Sequence + Unpin,
    F: FnMut(S::Item, S::Item, usize) -> Fut,
    Fut: Future<Output = S::Item>,
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        if let Some(fut) = self.in_flight.as_mut() {
            match fut.as_mut().poll(cx) {
                Poll::Ready(acc) => {
                    self.in_flight = None;
                    self.acc = Some(acc.clone());
                    return Poll::Ready(Some(acc));
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        if self.done {
            return Poll::Ready(None);
        }

        match Pin::new(&mut self.seq).poll_next(cx) {
            Poll::Ready(Some(item)) => match self.acc.take() {
                Some(acc) => {
                    let index = self.index;
                    self.index += 1;
                    self.in_flight = Some(Box::pin((self.f)(acc, item, index)));
                    self.poll_next(cx)
                }
                None => {
                    // First element seeds the accumulator and is yielded as-is.
                    self.acc = Some(item.clone());
                    Poll::Ready(Some(item))
                }
            },
            Poll::Ready(None) => {
                self.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.seq.size_hint();
        let in_flight = usize::from(self.in_flight.is_some());
        (
            lower.saturating_add(in_flight),
            upper.and_then(|u| u.checked_add(in_flight)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::iter;
    use std::future::ready;
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

    fn drain<S: Sequence + Unpin>(mut seq: S) -> Vec<S::Item> {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut out = Vec::new();
        loop {
            match Pin::new(&mut seq).poll_next(&mut cx) {
                Poll::Ready(Some(item)) => out.push(item),
                Poll::Ready(None) => return out,
                Poll::Pending => {}
            }
        }
    }

    #[test]
    fn scan_yields_running_totals() {
        init_test("scan_yields_running_totals");
        let seq = Scan::new(iter(vec![1, 2, 3, 4]), 0, |acc: i32, n: i32, _i| {
            ready(acc + n)
        });
        let items = drain(seq);
        let ok = items == vec![1, 3, 6, 10];
        crate::assert_with_log!(ok, "running totals", vec![1, 3, 6, 10], items);
        crate::test_complete!("scan_yields_running_totals");
    }

    #[test]
    fn scan_of_empty_yields_nothing() {
        init_test("scan_of_empty_yields_nothing");
        let seq = Scan::new(iter(Vec::<i32>::new()), 42, |acc: i32, n: i32, _i| {
            ready(acc + n)
        });
        let items = drain(seq);
        let ok = items.is_empty();
        crate::assert_with_log!(ok, "empty scan", Vec::<i32>::new(), items);
        crate::test_complete!("scan_of_empty_yields_nothing");
    }

    #[test]
    fn scan1_yields_first_element_then_folds() {
        init_test("scan1_yields_first_element_then_folds");
        let seq = Scan1::new(iter(vec![1, 2, 3]), |acc: i32, n: i32, _i| ready(acc + n));
        let items = drain(seq);
        let ok = items == vec![1, 3, 6];
        crate::assert_with_log!(ok, "scan1", vec![1, 3, 6], items);
        crate::test_complete!("scan1_yields_first_element_then_folds");
    }

    /// Mirror of fold1's index rule: the second element sees index 1.
    #[test]
    fn scan1_index_starts_at_one() {
        init_test("scan1_index_starts_at_one");
        let seq = Scan1::new(iter(vec![1, 2, 3]), |acc: i32, n: i32, i| {
            ready(acc + n * i32::try_from(i).expect("small index"))
        });
        let items = drain(seq);
        // 1, then 1 + 2*1 = 3, then 3 + 3*2 = 9.
        let ok = items == vec![1, 3, 9];
        crate::assert_with_log!(ok, "indexed scan1", vec![1, 3, 9], items);
        crate::test_complete!("scan1_index_starts_at_one");
    }

    #[test]
    fn scan1_of_empty_yields_nothing() {
        init_test("scan1_of_empty_yields_nothing");
        let seq = Scan1::new(iter(Vec::<i32>::new()), |acc: i32, n: i32, _i| {
            ready(acc + n)
        });
        let items = drain(seq);
        let ok = items.is_empty();
        crate::assert_with_log!(ok, "empty scan1", Vec::<i32>::new(), items);
        crate::test_complete!("scan1_of_empty_yields_nothing");
    }
}
