//! Search consumers: short-circuiting scans for an element or its position.
//!
//! Every future in this module stops pulling the instant its answer is
//! determined.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future for [`SequenceExt::find`](super::SequenceExt::find).
///
/// Resolves to the first element satisfying the predicate, or `None` once
/// the sequence is exhausted.
#[must_use = "futures do nothing unless polled"]
pub struct Find<S: Sequence, P, Fut> {
    seq: S,
    pred: P,
    index: usize,
    pending: Option<(S::Item, Pin<Box<Fut>>)>,
}

impl<S: Sequence, P, Fut> Find<S, P, Fut> {
    pub(crate) fn new(seq: S, pred: P) -> Self {
        Self {
            seq,
            pred,
            index: 0,
            pending: None,
        }
    }
}

impl<S: Sequence + Unpin, P, Fut> Unpin for Find<S, P, Fut> {}

impl<S, P, Fut> fmt::Debug for Find<S, P, Fut>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Find")
            .field("seq", &self.seq)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Future for Find<S, P, Fut>
where
    S: Sequence + Unpin,
    P: FnMut(&S::Item, usize) -> Fut,
    Fut: Future<Output = bool>,
{
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        loop {
            if let Some((_, fut)) = self.pending.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(verdict) => {
                        let (item, _) = self.pending.take().expect("pending just checked");
                        if verdict {
                            return Poll::Ready(Some(item));
                        }
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
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
}

/// Future for [`SequenceExt::position`](super::SequenceExt::position).
///
/// Resolves to the zero-based index of the first element satisfying the
/// predicate, or `None` once the sequence is exhausted.
#[must_use = "futures do nothing unless polled"]
pub struct Position<S, P, Fut> {
    seq: S,
    pred: P,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
}

impl<S, P, Fut> Position<S, P, Fut> {
    pub(crate) fn new(seq: S, pred: P) -> Self {
        Self {
            seq,
            pred,
            index: 0,
            in_flight: None,
        }
    }
}

impl<S: Unpin, P, Fut> Unpin for Position<S, P, Fut> {}

impl<S: fmt::Debug, P, Fut> fmt::Debug for Position<S, P, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("seq", &self.seq)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Future for Position<S, P, Fut>
where
    S: Sequence + Unpin,
    P: FnMut(&S::Item, usize) -> Fut,
    Fut: Future<Output = bool>,
{
    type Output = Option<usize>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<usize>> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(verdict) => {
                        self.in_flight = None;
                        if verdict {
                            // index was already advanced past the match.
                            return Poll::Ready(Some(self.index - 1));
                        }
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let index = self.index;
                    self.index += 1;
                    self.in_flight = Some(Box::pin((self.pred)(&item, index)));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::nth`](super::SequenceExt::nth).
///
/// Resolves to the element at the zero-based position, or `None` if the
/// sequence is shorter. Pulls exactly `n + 1` elements at most.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Nth<S> {
    seq: S,
    remaining: usize,
}

impl<S> Nth<S> {
    pub(crate) fn new(seq: S, n: usize) -> Self {
        Self { seq, remaining: n }
    }
}

impl<S: Unpin> Unpin for Nth<S> {}

impl<S: Sequence + Unpin> Future for Nth<S> {
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
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
}

/// Future for [`SequenceExt::contains`](super::SequenceExt::contains).
///
/// Resolves to true the instant an element equal to the target is pulled.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Contains<S: Sequence> {
    seq: S,
    target: S::Item,
}

impl<S: Sequence> Contains<S> {
    pub(crate) fn new(seq: S, target: S::Item) -> Self {
        Self { seq, target }
    }
}

impl<S: Sequence + Unpin> Unpin for Contains<S> {}

impl<S> Future for Contains<S>
where
    S: Sequence + Unpin,
    S::Item: PartialEq,
{
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if item == self.target {
                        return Poll::Ready(true);
                    }
                }
                Poll::Ready(None) => return Poll::Ready(false),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::index_of`](super::SequenceExt::index_of).
///
/// Resolves to the zero-based index of the first element equal to the
/// target, or `None` once the sequence is exhausted.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct IndexOf<S: Sequence> {
    seq: S,
    target: S::Item,
    index: usize,
}

impl<S: Sequence> IndexOf<S> {
    pub(crate) fn new(seq: S, target: S::Item) -> Self {
        Self {
            seq,
            target,
            index: 0,
        }
    }
}

impl<S: Sequence + Unpin> Unpin for IndexOf<S> {}

impl<S> Future for IndexOf<S>
where
    S: Sequence + Unpin,
    S::Item: PartialEq,
{
    type Output = Option<usize>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<usize>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if item == self.target {
                        return Poll::Ready(Some(self.index));
                    }
                    self.index += 1;
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
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

    fn resolve<F: Future + Unpin>(mut fut: F) -> F::Output {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        loop {
            if let Poll::Ready(out) = Pin::new(&mut fut).poll(&mut cx) {
                return out;
            }
        }
    }

    /// Source that panics when pulled past the given element count.
    fn fused_at(limit: usize) -> impl Sequence<Item = usize> + Unpin {
        iter((0..).map(move |n| {
            assert!(n < limit, "pulled past element {limit}");
            n
        }))
    }

    #[test]
    fn find_returns_first_match_and_stops() {
        init_test("find_returns_first_match_and_stops");
        // 0,1,2 pulled; the match at 2 must stop further pulls.
        let found = resolve(Find::new(fused_at(3), |n: &usize, _i| ready(*n == 2)));
        crate::assert_with_log!(found == Some(2), "found", Some(2), found);
        crate::test_complete!("find_returns_first_match_and_stops");
    }

    #[test]
    fn find_returns_none_when_no_match() {
        init_test("find_returns_none_when_no_match");
        let found = resolve(Find::new(iter(vec![1, 2, 3]), |n: &i32, _i| {
            ready(*n > 10)
        }));
        crate::assert_with_log!(found.is_none(), "not found", None::<i32>, found);
        crate::test_complete!("find_returns_none_when_no_match");
    }

    #[test]
    fn position_reports_zero_based_index() {
        init_test("position_reports_zero_based_index");
        let pos = resolve(Position::new(iter(vec![10, 20, 30]), |n: &i32, _i| {
            ready(*n == 30)
        }));
        crate::assert_with_log!(pos == Some(2), "position", Some(2), pos);
        crate::test_complete!("position_reports_zero_based_index");
    }

    #[test]
    fn position_passes_matching_indices() {
        init_test("position_passes_matching_indices");
        let pos = resolve(Position::new(iter(vec!["a", "b", "c"]), |_n: &&str, i| {
            ready(i == 1)
        }));
        crate::assert_with_log!(pos == Some(1), "index predicate", Some(1), pos);
        crate::test_complete!("position_passes_matching_indices");
    }

    #[test]
    fn nth_pulls_exactly_n_plus_one() {
        init_test("nth_pulls_exactly_n_plus_one");
        let item = resolve(Nth::new(fused_at(3), 2));
        crate::assert_with_log!(item == Some(2), "nth", Some(2), item);
        crate::test_complete!("nth_pulls_exactly_n_plus_one");
    }

    #[test]
    fn nth_past_end_is_none() {
        init_test("nth_past_end_is_none");
        let item = resolve(Nth::new(iter(vec![1, 2]), 5));
        crate::assert_with_log!(item.is_none(), "past end", None::<i32>, item);
        crate::test_complete!("nth_past_end_is_none");
    }

    #[test]
    fn contains_short_circuits() {
        init_test("contains_short_circuits");
        let hit = resolve(Contains::new(fused_at(2), 1));
        crate::assert_with_log!(hit, "contains", true, hit);

        let miss = resolve(Contains::new(iter(vec![1, 2, 3]), 9));
        crate::assert_with_log!(!miss, "missing", false, miss);
        crate::test_complete!("contains_short_circuits");
    }

    #[test]
    fn index_of_first_occurrence() {
        init_test("index_of_first_occurrence");
        let pos = resolve(IndexOf::new(iter(vec![5, 7, 5]), 5));
        crate::assert_with_log!(pos == Some(0), "first occurrence", Some(0), pos);

        let missing = resolve(IndexOf::new(iter(vec![5, 7, 5]), 9));
        crate::assert_with_log!(missing.is_none(), "missing", None::<usize>, missing);
        crate::test_complete!("index_of_first_occurrence");
    }
}
