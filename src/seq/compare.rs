//! Dual-sequence comparators: lockstep structural comparison.
//!
//! Each step pulls the first sequence fully, then the second, before any
//! pair is compared. No further pulls occur once the verdict is fixed.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future for [`SequenceExt::eq`](super::SequenceExt::eq) and
/// [`SequenceExt::ne`](super::SequenceExt::ne).
///
/// Resolves to true only if both sequences exhaust simultaneously with
/// every pair equal; resolves the instant a pair differs or exactly one
/// side is exhausted. `ne` is the same walk with the result negated.
#[must_use = "futures do nothing unless polled"]
pub struct Equal<S1: Sequence, S2> {
    first: S1,
    second: S2,
    // A's pull result, buffered until B's pull resolves.
    queued: Option<Option<S1::Item>>,
    negate: bool,
}

impl<S1: Sequence, S2> Equal<S1, S2> {
    pub(crate) fn new(first: S1, second: S2, negate: bool) -> Self {
        Self {
            first,
            second,
            queued: None,
            negate,
        }
    }
}

impl<S1: Sequence + Unpin, S2: Unpin> Unpin for Equal<S1, S2> {}

impl<S1, S2> fmt::Debug for Equal<S1, S2>
where
    S1: Sequence + fmt::Debug,
    S2: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equal")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("negate", &self.negate)
            .finish_non_exhaustive()
    }
}

impl<S1, S2> Future for Equal<S1, S2>
where
    S1: Sequence + Unpin,
    S2: Sequence + Unpin,
    S1::Item: PartialEq<S2::Item>,
{
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            if self.queued.is_none() {
                match Pin::new(&mut self.first).poll_next(cx) {
                    Poll::Ready(head) => self.queued = Some(head),
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.second).poll_next(cx) {
                Poll::Ready(head_b) => {
                    let head_a = self.queued.take().expect("queued A pull present");
                    match (head_a, head_b) {
                        (Some(a), Some(b)) => {
                            if a != b {
                                return Poll::Ready(self.negate);
                            }
                        }
                        (None, None) => return Poll::Ready(!self.negate),
                        _ => return Poll::Ready(self.negate),
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::eq_by`](super::SequenceExt::eq_by).
///
/// Like [`Equal`] but each pair is judged by a caller-supplied comparator,
/// which is awaited before the walk continues.
#[must_use = "futures do nothing unless polled"]
pub struct EqualBy<S1: Sequence, S2, F, Fut> {
    first: S1,
    second: S2,
    cmp: F,
    queued: Option<Option<S1::Item>>,
    in_flight: Option<Pin<Box<Fut>>>,
}

impl<S1: Sequence, S2, F, Fut> EqualBy<S1, S2, F, Fut> {
    pub(crate) fn new(first: S1, second: S2, cmp: F) -> Self {
        Self {
            first,
            second,
            cmp,
            queued: None,
            in_flight: None,
        }
    }
}

impl<S1: Sequence + Unpin, S2: Unpin, F, Fut> Unpin for EqualBy<S1, S2, F, Fut> {}

impl<S1, S2, F, Fut> fmt::Debug for EqualBy<S1, S2, F, Fut>
where
    S1: Sequence + fmt::Debug,
    S2: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualBy")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish_non_exhaustive()
    }
}

impl<S1, S2, F, Fut> Future for EqualBy<S1, S2, F, Fut>
where
    S1: Sequence + Unpin,
    S2: Sequence + Unpin,
    F: FnMut(S1::Item, S2::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(equal) => {
                        self.in_flight = None;
                        if !equal {
                            return Poll::Ready(false);
                        }
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if self.queued.is_none() {
                match Pin::new(&mut self.first).poll_next(cx) {
                    Poll::Ready(head) => self.queued = Some(head),
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.second).poll_next(cx) {
                Poll::Ready(head_b) => {
                    let head_a = self.queued.take().expect("queued A pull present");
                    match (head_a, head_b) {
                        (Some(a), Some(b)) => {
                            self.in_flight = Some(Box::pin((self.cmp)(a, b)));
                        }
                        (None, None) => return Poll::Ready(true),
                        _ => return Poll::Ready(false),
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::starts_with`](super::SequenceExt::starts_with).
///
/// The same lockstep walk as [`Equal`], but resolves to true once the
/// prefix sequence is exhausted, regardless of how much of the main
/// sequence remains.
#[must_use = "futures do nothing unless polled"]
pub struct StartsWith<S1: Sequence, S2> {
    seq: S1,
    prefix: S2,
    queued: Option<Option<S1::Item>>,
}

impl<S1: Sequence, S2> StartsWith<S1, S2> {
    pub(crate) fn new(seq: S1, prefix: S2) -> Self {
        Self {
            seq,
            prefix,
            queued: None,
        }
    }
}

impl<S1: Sequence + Unpin, S2: Unpin> Unpin for StartsWith<S1, S2> {}

impl<S1, S2> fmt::Debug for StartsWith<S1, S2>
where
    S1: Sequence + fmt::Debug,
    S2: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartsWith")
            .field("seq", &self.seq)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<S1, S2> Future for StartsWith<S1, S2>
where
    S1: Sequence + Unpin,
    S2: Sequence + Unpin,
    S1::Item: PartialEq<S2::Item>,
{
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            if self.queued.is_none() {
                match Pin::new(&mut self.seq).poll_next(cx) {
                    Poll::Ready(head) => self.queued = Some(head),
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.prefix).poll_next(cx) {
                Poll::Ready(head_b) => {
                    let head_a = self.queued.take().expect("queued A pull present");
                    match (head_a, head_b) {
                        // Prefix exhausted first: match, whatever remains.
                        (_, None) => return Poll::Ready(true),
                        (None, Some(_)) => return Poll::Ready(false),
                        (Some(a), Some(b)) => {
                            if a != b {
                                return Poll::Ready(false);
                            }
                        }
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::starts_with_by`](super::SequenceExt::starts_with_by).
///
/// [`StartsWith`] with a caller-supplied comparator for each pair.
#[must_use = "futures do nothing unless polled"]
pub struct StartsWithBy<S1: Sequence, S2, F, Fut> {
    seq: S1,
    prefix: S2,
    cmp: F,
    queued: Option<Option<S1::Item>>,
    in_flight: Option<Pin<Box<Fut>>>,
}

impl<S1: Sequence, S2, F, Fut> StartsWithBy<S1, S2, F, Fut> {
    pub(crate) fn new(seq: S1, prefix: S2, cmp: F) -> Self {
        Self {
            seq,
            prefix,
            cmp,
            queued: None,
            in_flight: None,
        }
    }
}

impl<S1: Sequence + Unpin, S2: Unpin, F, Fut> Unpin for StartsWithBy<S1, S2, F, Fut> {}

impl<S1, S2, F, Fut> fmt::Debug for StartsWithBy<S1, S2, F, Fut>
where
    S1: Sequence + fmt::Debug,
    S2: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartsWithBy")
            .field("seq", &self.seq)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<S1, S2, F, Fut> Future for StartsWithBy<S1, S2, F, Fut>
where
    S1: Sequence + Unpin,
    S2: Sequence + Unpin,
    F: FnMut(S1::Item, S2::Item) -> Fut,
    Fut: Future<Output = bool>,
{
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(equal) => {
                        self.in_flight = None;
                        if !equal {
                            return Poll::Ready(false);
                        }
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if self.queued.is_none() {
                match Pin::new(&mut self.seq).poll_next(cx) {
                    Poll::Ready(head) => self.queued = Some(head),
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.prefix).poll_next(cx) {
                Poll::Ready(head_b) => {
                    let head_a = self.queued.take().expect("queued A pull present");
                    match (head_a, head_b) {
                        (_, None) => return Poll::Ready(true),
                        (None, Some(_)) => return Poll::Ready(false),
                        (Some(a), Some(b)) => {
                            self.in_flight = Some(Box::pin((self.cmp)(a, b)));
                        }
                    }
                }
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

    #[test]
    fn equal_sequences_compare_true() {
        init_test("equal_sequences_compare_true");
        let same = resolve(Equal::new(iter(vec![1, 2, 3]), iter(vec![1, 2, 3]), false));
        crate::assert_with_log!(same, "equal", true, same);

        let empty = resolve(Equal::new(
            iter(Vec::<i32>::new()),
            iter(Vec::<i32>::new()),
            false,
        ));
        crate::assert_with_log!(empty, "empty equal", true, empty);
        crate::test_complete!("equal_sequences_compare_true");
    }

    #[test]
    fn equal_is_false_when_lengths_differ() {
        init_test("equal_is_false_when_lengths_differ");
        let longer = resolve(Equal::new(iter(vec![1, 2, 3, 4]), iter(vec![1, 2, 3]), false));
        crate::assert_with_log!(!longer, "longer A", false, longer);

        let shorter = resolve(Equal::new(iter(vec![1, 2]), iter(vec![1, 2, 3]), false));
        crate::assert_with_log!(!shorter, "shorter A", false, shorter);
        crate::test_complete!("equal_is_false_when_lengths_differ");
    }

    #[test]
    fn equal_stops_pulling_at_first_mismatch() {
        init_test("equal_stops_pulling_at_first_mismatch");
        let poisoned = iter((0..).map(|n| match n {
            0 => 1,
            1 => 99,
            _ => panic!("pulled past the mismatch"),
        }));
        let same = resolve(Equal::new(poisoned, iter(vec![1, 2, 3]), false));
        crate::assert_with_log!(!same, "mismatch", false, same);
        crate::test_complete!("equal_stops_pulling_at_first_mismatch");
    }

    #[test]
    fn negated_equal_flips_the_verdict() {
        init_test("negated_equal_flips_the_verdict");
        let ne = resolve(Equal::new(iter(vec![1, 2]), iter(vec![1, 3]), true));
        crate::assert_with_log!(ne, "ne", true, ne);

        let eq = resolve(Equal::new(iter(vec![1, 2]), iter(vec![1, 2]), true));
        crate::assert_with_log!(!eq, "ne of equal", false, eq);
        crate::test_complete!("negated_equal_flips_the_verdict");
    }

    #[test]
    fn equal_by_uses_the_comparator() {
        init_test("equal_by_uses_the_comparator");
        let same = resolve(EqualBy::new(
            iter(vec!["a", "B"]),
            iter(vec!["A", "b"]),
            |a: &str, b: &str| ready(a.eq_ignore_ascii_case(b)),
        ));
        crate::assert_with_log!(same, "case insensitive", true, same);
        crate::test_complete!("equal_by_uses_the_comparator");
    }

    #[test]
    fn starts_with_is_true_for_empty_prefix() {
        init_test("starts_with_is_true_for_empty_prefix");
        let matched = resolve(StartsWith::new(iter(vec![1, 2, 3]), iter(Vec::<i32>::new())));
        crate::assert_with_log!(matched, "empty prefix", true, matched);

        let both_empty = resolve(StartsWith::new(
            iter(Vec::<i32>::new()),
            iter(Vec::<i32>::new()),
        ));
        crate::assert_with_log!(both_empty, "both empty", true, both_empty);
        crate::test_complete!("starts_with_is_true_for_empty_prefix");
    }

    #[test]
    fn starts_with_matches_pairwise_up_to_prefix_length() {
        init_test("starts_with_matches_pairwise_up_to_prefix_length");
        let matched = resolve(StartsWith::new(iter(vec![1, 2, 3, 4]), iter(vec![1, 2])));
        crate::assert_with_log!(matched, "prefix", true, matched);

        let mismatched = resolve(StartsWith::new(iter(vec![1, 2, 3]), iter(vec![1, 9])));
        crate::assert_with_log!(!mismatched, "mismatch", false, mismatched);

        let too_long = resolve(StartsWith::new(iter(vec![1, 2]), iter(vec![1, 2, 3])));
        crate::assert_with_log!(!too_long, "prefix longer", false, too_long);
        crate::test_complete!("starts_with_matches_pairwise_up_to_prefix_length");
    }

    #[test]
    fn starts_with_by_uses_the_comparator() {
        init_test("starts_with_by_uses_the_comparator");
        let matched = resolve(StartsWithBy::new(
            iter(vec![10, 21, 35]),
            iter(vec![1, 2]),
            |a: i32, b: i32| ready(a / 10 == b),
        ));
        crate::assert_with_log!(matched, "by tens", true, matched);
        crate::test_complete!("starts_with_by_uses_the_comparator");
    }
}
