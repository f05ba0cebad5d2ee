//! Aggregate reducers: numeric and boolean folds over a whole sequence.
//!
//! `sum`, `product`, and `average` drain their input; the boolean reducers
//! and the extremum trackers stop pulling as soon as the answer is fixed
//! (or, for extrema, at exhaustion).

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future for [`SequenceExt::sum`](super::SequenceExt::sum).
///
/// Folds with identity 0; an empty sequence resolves to `0.0`.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Sum<S> {
    seq: S,
    total: f64,
}

impl<S> Sum<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq, total: 0.0 }
    }
}

impl<S: Unpin> Unpin for Sum<S> {}

impl<S> Future for Sum<S>
where
    S: Sequence + Unpin,
    S::Item: Into<f64>,
{
    type Output = f64;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<f64> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => self.total += item.into(),
                Poll::Ready(None) => return Poll::Ready(self.total),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::product`](super::SequenceExt::product).
///
/// Folds with identity 1; an empty sequence resolves to `1.0`.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Product<S> {
    seq: S,
    total: f64,
}

impl<S> Product<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self { seq, total: 1.0 }
    }
}

impl<S: Unpin> Unpin for Product<S> {}

impl<S> Future for Product<S>
where
    S: Sequence + Unpin,
    S::Item: Into<f64>,
{
    type Output = f64;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<f64> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => self.total *= item.into(),
                Poll::Ready(None) => return Poll::Ready(self.total),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::average`](super::SequenceExt::average).
///
/// Tracks a running `(sum, count)` pair; resolves to `None` for an empty
/// sequence rather than dividing by zero.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Average<S> {
    seq: S,
    total: f64,
    count: usize,
}

impl<S> Average<S> {
    pub(crate) fn new(seq: S) -> Self {
        Self {
            seq,
            total: 0.0,
            count: 0,
        }
    }
}

impl<S: Unpin> Unpin for Average<S> {}

impl<S> Future for Average<S>
where
    S: Sequence + Unpin,
    S::Item: Into<f64>,
{
    type Output = Option<f64>;

    #[allow(clippy::cast_precision_loss)]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<f64>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    self.total += item.into();
                    self.count += 1;
                }
                Poll::Ready(None) => {
                    if self.count == 0 {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(self.total / self.count as f64));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::maximum`](super::SequenceExt::maximum) and
/// [`SequenceExt::minimum`](super::SequenceExt::minimum).
///
/// Tracks a running extremal element with a strict comparison, so ties
/// keep the first occurrence. An empty sequence resolves to `None`.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Extremum<S: Sequence> {
    seq: S,
    best: Option<S::Item>,
    take_max: bool,
}

impl<S: Sequence> Extremum<S> {
    pub(crate) fn new(seq: S, take_max: bool) -> Self {
        Self {
            seq,
            best: None,
            take_max,
        }
    }
}

impl<S: Sequence + Unpin> Unpin for Extremum<S> {}

impl<S> Future for Extremum<S>
where
    S: Sequence + Unpin,
    S::Item: PartialOrd,
{
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let replace = match self.best.as_ref() {
                        None => true,
                        Some(best) => {
                            if self.take_max {
                                item > *best
                            } else {
                                item < *best
                            }
                        }
                    };
                    if replace {
                        self.best = Some(item);
                    }
                }
                Poll::Ready(None) => return Poll::Ready(self.best.take()),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::maximum_by_key`](super::SequenceExt::maximum_by_key)
/// and [`SequenceExt::minimum_by_key`](super::SequenceExt::minimum_by_key).
///
/// Like [`Extremum`] but compares keys produced by a selector, which is
/// awaited once per element. Ties keep the first occurrence.
#[must_use = "futures do nothing unless polled"]
pub struct ExtremumBy<S: Sequence, F, Fut, K> {
    seq: S,
    selector: F,
    best: Option<(K, S::Item)>,
    pending: Option<(S::Item, Pin<Box<Fut>>)>,
    take_max: bool,
}

impl<S: Sequence, F, Fut, K> ExtremumBy<S, F, Fut, K> {
    pub(crate) fn new(seq: S, selector: F, take_max: bool) -> Self {
        Self {
            seq,
            selector,
            best: None,
            pending: None,
            take_max,
        }
    }
}

impl<S: Sequence + Unpin, F, Fut, K> Unpin for ExtremumBy<S, F, Fut, K> {}

impl<S, F, Fut, K> fmt::Debug for ExtremumBy<S, F, Fut, K>
where
    S: Sequence + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtremumBy")
            .field("seq", &self.seq)
            .field("take_max", &self.take_max)
            .finish_non_exhaustive()
    }
}

impl<S, F, Fut, K> Future for ExtremumBy<S, F, Fut, K>
where
    S: Sequence + Unpin,
    F: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = K>,
    K: PartialOrd,
{
    type Output = Option<S::Item>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        loop {
            if let Some((_, fut)) = self.pending.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(key) => {
                        let (item, _) = self.pending.take().expect("pending just checked");
                        let replace = match self.best.as_ref() {
                            None => true,
                            Some((best_key, _)) => {
                                if self.take_max {
                                    key > *best_key
                                } else {
                                    key < *best_key
                                }
                            }
                        };
                        if replace {
                            self.best = Some((key, item));
                        }
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    let fut = Box::pin((self.selector)(&item));
                    self.pending = Some((item, fut));
                }
                Poll::Ready(None) => {
                    return Poll::Ready(self.best.take().map(|(_, item)| item));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::and`](super::SequenceExt::and) and
/// [`SequenceExt::or`](super::SequenceExt::or).
///
/// Pulls boolean elements until one equals the short-circuit value, then
/// resolves to it without further pulls; exhaustion resolves to the
/// opposite. `and` short-circuits on false, `or` on true.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Junction<S> {
    seq: S,
    circuit: bool,
}

impl<S> Junction<S> {
    pub(crate) fn new(seq: S, circuit: bool) -> Self {
        Self { seq, circuit }
    }
}

impl<S: Unpin> Unpin for Junction<S> {}

impl<S: Sequence<Item = bool> + Unpin> Future for Junction<S> {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if item == self.circuit {
                        return Poll::Ready(self.circuit);
                    }
                }
                Poll::Ready(None) => return Poll::Ready(!self.circuit),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::any`](super::SequenceExt::any) and
/// [`SequenceExt::all`](super::SequenceExt::all).
///
/// `any` resolves to true the instant the predicate holds; `all` is `any`
/// with both the predicate verdict and the result negated, so it resolves
/// to false the instant the predicate fails. Both short-circuit.
#[must_use = "futures do nothing unless polled"]
pub struct Any<S, P, Fut> {
    seq: S,
    pred: P,
    invert: bool,
    index: usize,
    in_flight: Option<Pin<Box<Fut>>>,
}

impl<S, P, Fut> Any<S, P, Fut> {
    pub(crate) fn new(seq: S, pred: P, invert: bool) -> Self {
        Self {
            seq,
            pred,
            invert,
            index: 0,
            in_flight: None,
        }
    }
}

impl<S: Unpin, P, Fut> Unpin for Any<S, P, Fut> {}

impl<S: fmt::Debug, P, Fut> fmt::Debug for Any<S, P, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("seq", &self.seq)
            .field("invert", &self.invert)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> Future for Any<S, P, Fut>
where
    S: Sequence + Unpin,
    P: FnMut(&S::Item, usize) -> Fut,
    Fut: Future<Output = bool>,
{
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        loop {
            if let Some(fut) = self.in_flight.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(verdict) => {
                        self.in_flight = None;
                        if verdict != self.invert {
                            return Poll::Ready(!self.invert);
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
                Poll::Ready(None) => return Poll::Ready(self.invert),
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
    fn sum_and_product_identities() {
        init_test("sum_and_product_identities");
        let total = resolve(Sum::new(iter(vec![1, 2, 3])));
        crate::assert_with_log!((total - 6.0).abs() < f64::EPSILON, "sum", 6.0, total);

        let empty_sum = resolve(Sum::new(iter(Vec::<i32>::new())));
        crate::assert_with_log!(empty_sum == 0.0, "empty sum", 0.0, empty_sum);

        let prod = resolve(Product::new(iter(vec![2, 3, 4])));
        crate::assert_with_log!((prod - 24.0).abs() < f64::EPSILON, "product", 24.0, prod);

        let empty_prod = resolve(Product::new(iter(Vec::<i32>::new())));
        crate::assert_with_log!(empty_prod == 1.0, "empty product", 1.0, empty_prod);
        crate::test_complete!("sum_and_product_identities");
    }

    #[test]
    fn average_of_empty_is_none() {
        init_test("average_of_empty_is_none");
        let avg = resolve(Average::new(iter(vec![1, 2, 3, 4])));
        let ok = avg == Some(2.5);
        crate::assert_with_log!(ok, "average", Some(2.5), avg);

        let none = resolve(Average::new(iter(Vec::<i32>::new())));
        crate::assert_with_log!(none.is_none(), "empty average", None::<f64>, none);
        crate::test_complete!("average_of_empty_is_none");
    }

    /// Ordered by key only, so equal keys with different tags are ties.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Keyed {
        key: i32,
        tag: char,
    }

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    fn keyed(key: i32, tag: char) -> Keyed {
        Keyed { key, tag }
    }

    #[test]
    fn extremum_first_occurrence_wins_ties() {
        init_test("extremum_first_occurrence_wins_ties");
        let max = resolve(Extremum::new(
            iter(vec![keyed(3, 'a'), keyed(1, 'b'), keyed(3, 'c')]),
            true,
        ));
        let ok = max == Some(keyed(3, 'a'));
        crate::assert_with_log!(ok, "max tie", Some(keyed(3, 'a')), max);

        let min = resolve(Extremum::new(
            iter(vec![keyed(2, 'x'), keyed(1, 'y'), keyed(1, 'z')]),
            false,
        ));
        let ok = min == Some(keyed(1, 'y'));
        crate::assert_with_log!(ok, "min tie", Some(keyed(1, 'y')), min);
        crate::test_complete!("extremum_first_occurrence_wins_ties");
    }

    #[test]
    fn extremum_of_empty_is_none() {
        init_test("extremum_of_empty_is_none");
        let max = resolve(Extremum::new(iter(Vec::<i32>::new()), true));
        crate::assert_with_log!(max.is_none(), "empty max", None::<i32>, max);
        crate::test_complete!("extremum_of_empty_is_none");
    }

    #[test]
    fn extremum_by_compares_selected_keys() {
        init_test("extremum_by_compares_selected_keys");
        let longest = resolve(ExtremumBy::new(
            iter(vec!["ab", "abcd", "abc"]),
            |s: &&str| ready(s.len()),
            true,
        ));
        let ok = longest == Some("abcd");
        crate::assert_with_log!(ok, "longest", Some("abcd"), longest);

        let shortest = resolve(ExtremumBy::new(
            iter(vec!["ab", "abcd", "a"]),
            |s: &&str| ready(s.len()),
            false,
        ));
        let ok = shortest == Some("a");
        crate::assert_with_log!(ok, "shortest", Some("a"), shortest);

        // Equal keys keep the first occurrence.
        let tied = resolve(ExtremumBy::new(
            iter(vec!["ab", "cd"]),
            |s: &&str| ready(s.len()),
            true,
        ));
        let ok = tied == Some("ab");
        crate::assert_with_log!(ok, "tied keys", Some("ab"), tied);
        crate::test_complete!("extremum_by_compares_selected_keys");
    }

    #[test]
    fn junction_and_or_semantics() {
        init_test("junction_and_or_semantics");
        // and
        let all_true = resolve(Junction::new(iter(vec![true, true]), false));
        crate::assert_with_log!(all_true, "and true", true, all_true);
        let has_false = resolve(Junction::new(iter(vec![true, false, true]), false));
        crate::assert_with_log!(!has_false, "and false", false, has_false);
        let empty_and = resolve(Junction::new(iter(Vec::<bool>::new()), false));
        crate::assert_with_log!(empty_and, "empty and", true, empty_and);

        // or
        let has_true = resolve(Junction::new(iter(vec![false, true]), true));
        crate::assert_with_log!(has_true, "or true", true, has_true);
        let empty_or = resolve(Junction::new(iter(Vec::<bool>::new()), true));
        crate::assert_with_log!(!empty_or, "empty or", false, empty_or);
        crate::test_complete!("junction_and_or_semantics");
    }

    #[test]
    fn junction_short_circuits() {
        init_test("junction_short_circuits");
        let source = iter((0..).map(|n| match n {
            0 => true,
            1 => false,
            _ => panic!("pulled past the short circuit"),
        }));
        let verdict = resolve(Junction::new(source, false));
        crate::assert_with_log!(!verdict, "and short circuit", false, verdict);
        crate::test_complete!("junction_short_circuits");
    }

    #[test]
    fn any_and_all_short_circuit() {
        init_test("any_and_all_short_circuit");
        let any = resolve(Any::new(iter(vec![1, 2, 3]), |n: &i32, _i| ready(*n == 2), false));
        crate::assert_with_log!(any, "any", true, any);

        let all = resolve(Any::new(iter(vec![1, 2, 3]), |n: &i32, _i| ready(*n > 0), true));
        crate::assert_with_log!(all, "all", true, all);

        let not_all = resolve(Any::new(iter(vec![1, -2, 3]), |n: &i32, _i| ready(*n > 0), true));
        crate::assert_with_log!(!not_all, "not all", false, not_all);

        // Vacuous truth on empty input.
        let empty_all = resolve(Any::new(iter(Vec::<i32>::new()), |_n: &i32, _i| ready(false), true));
        crate::assert_with_log!(empty_all, "empty all", true, empty_all);
        let empty_any = resolve(Any::new(iter(Vec::<i32>::new()), |_n: &i32, _i| ready(true), false));
        crate::assert_with_log!(!empty_any, "empty any", false, empty_any);
        crate::test_complete!("any_and_all_short_circuit");
    }
}
