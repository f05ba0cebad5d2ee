//! Collection consumers: drain a sequence into an owned collection.

use super::Sequence;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future for [`SequenceExt::collect`](super::SequenceExt::collect) and
/// [`SequenceExt::to_vec`](super::SequenceExt::to_vec).
///
/// Pulls the sequence to exhaustion, extending a collection with each
/// element in order.
#[must_use = "futures do nothing unless polled"]
pub struct Collect<S, C> {
    seq: S,
    collection: Option<C>,
}

impl<S, C: Default> Collect<S, C> {
    pub(crate) fn new(seq: S) -> Self {
        Self {
            seq,
            collection: Some(C::default()),
        }
    }
}

impl<S: Unpin, C> Unpin for Collect<S, C> {}

impl<S: fmt::Debug, C> fmt::Debug for Collect<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collect")
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl<S, C> Future for Collect<S, C>
where
    S: Sequence + Unpin,
    C: Default + Extend<S::Item>,
{
    type Output = C;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<C> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    self.collection
                        .as_mut()
                        .expect("Collect polled after completion")
                        .extend(Some(item));
                }
                Poll::Ready(None) => {
                    let collection = self
                        .collection
                        .take()
                        .expect("Collect polled after completion");
                    return Poll::Ready(collection);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Future for [`SequenceExt::all_some`](super::SequenceExt::all_some).
///
/// Collects a sequence of `Option<T>` into `Some(Vec<T>)`, or resolves to
/// `None` the instant any element is `None`, discarding the partial list
/// and pulling no further.
#[must_use = "futures do nothing unless polled"]
pub struct AllSome<S, T> {
    seq: S,
    collected: Vec<T>,
}

impl<S, T> AllSome<S, T> {
    pub(crate) fn new(seq: S) -> Self {
        Self {
            seq,
            collected: Vec::new(),
        }
    }
}

impl<S: Unpin, T> Unpin for AllSome<S, T> {}

impl<S: fmt::Debug, T> fmt::Debug for AllSome<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllSome")
            .field("seq", &self.seq)
            .field("collected", &self.collected.len())
            .finish_non_exhaustive()
    }
}

impl<S, T> Future for AllSome<S, T>
where
    S: Sequence<Item = Option<T>> + Unpin,
{
    type Output = Option<Vec<T>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Vec<T>>> {
        loop {
            match Pin::new(&mut self.seq).poll_next(cx) {
                Poll::Ready(Some(Some(item))) => self.collected.push(item),
                Poll::Ready(Some(None)) => {
                    self.collected.clear();
                    return Poll::Ready(None);
                }
                Poll::Ready(None) => {
                    return Poll::Ready(Some(std::mem::take(&mut self.collected)));
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
    fn collect_into_vec_preserves_order() {
        init_test("collect_into_vec_preserves_order");
        let items: Vec<i32> = resolve(Collect::new(iter(vec![3, 1, 2])));
        let ok = items == vec![3, 1, 2];
        crate::assert_with_log!(ok, "collected", vec![3, 1, 2], items);
        crate::test_complete!("collect_into_vec_preserves_order");
    }

    #[test]
    fn collect_of_empty_is_empty() {
        init_test("collect_of_empty_is_empty");
        let items: Vec<i32> = resolve(Collect::new(iter(Vec::<i32>::new())));
        let ok = items.is_empty();
        crate::assert_with_log!(ok, "empty", Vec::<i32>::new(), items);
        crate::test_complete!("collect_of_empty_is_empty");
    }

    #[test]
    fn collect_into_string() {
        init_test("collect_into_string");
        let text: String = resolve(Collect::new(iter(vec!['a', 'b', 'c'])));
        let ok = text == "abc";
        crate::assert_with_log!(ok, "string", "abc", text);
        crate::test_complete!("collect_into_string");
    }

    #[test]
    fn all_some_collects_when_no_none() {
        init_test("all_some_collects_when_no_none");
        let items = resolve(AllSome::new(iter(vec![Some(1), Some(2), Some(3)])));
        let ok = items == Some(vec![1, 2, 3]);
        crate::assert_with_log!(ok, "all some", Some(vec![1, 2, 3]), items);
        crate::test_complete!("all_some_collects_when_no_none");
    }

    #[test]
    fn all_some_short_circuits_on_none() {
        init_test("all_some_short_circuits_on_none");
        // Source panics if pulled past the None.
        let source = iter((0..).map(|n| match n {
            0 => Some(1),
            1 => None,
            _ => panic!("pulled past the first None"),
        }));
        let items = resolve(AllSome::new(source));
        let ok = items.is_none();
        crate::assert_with_log!(ok, "short circuit", None::<Vec<i32>>, items);
        crate::test_complete!("all_some_short_circuits_on_none");
    }
}
