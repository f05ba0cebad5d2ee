//! Lazy, composable combinators over asynchronous sequences.
//!
//! A [`Sequence`] is an ordered, single-pass series of elements realized
//! over time. The only primitive is the pull: [`Sequence::poll_next`]
//! either yields the next element or signals exhaustion, and exhaustion is
//! sticky. Everything else is built on top of it:
//!
//! - sources ([`iter`], [`resolved`], [`deferred`], [`once`]) adapt
//!   ordinary values into sequences;
//! - lazy combinators ([`SequenceExt::map`], [`SequenceExt::filter`],
//!   [`SequenceExt::take`], ...) wrap one sequence to produce another
//!   without pulling anything;
//! - terminal consumers ([`SequenceExt::to_vec`], [`SequenceExt::fold`],
//!   [`SequenceExt::find`], ...) are futures that drive the pipeline when
//!   awaited, and stop pulling the instant their answer is determined.
//!
//! No combinator pre-fetches: an element that is never pulled is never
//! produced, and a callback for it never runs.
//!
//! ```
//! use aseq::SequenceExt;
//!
//! # futures_lite::future::block_on(async {
//! let evens = aseq::iter(1..=10)
//!     .filter(|n, _i| std::future::ready(n % 2 == 0))
//!     .take(3)
//!     .to_vec()
//!     .await;
//! assert_eq!(evens, vec![2, 4, 6]);
//! # });
//! ```

mod chain;
mod collect;
mod compare;
mod consume;
mod exclude_first;
mod filter;
mod find;
mod flatten;
mod fold;
mod initial;
mod map;
mod reduce;
mod scan;
mod sequence;
mod source;
mod take;
mod zip;

pub use self::chain::Chain;
pub use self::collect::{AllSome, Collect};
pub use self::compare::{Equal, EqualBy, StartsWith, StartsWithBy};
pub use self::consume::{Count, First, IsEmpty, Last, Only};
pub use self::exclude_first::{ExcludeFirst, RemoveFirst};
pub use self::filter::{ExcludeNone, Filter, Remove};
pub use self::find::{Contains, Find, IndexOf, Nth, Position};
pub use self::flatten::{FlatMap, Flatten};
pub use self::fold::{Fold, Fold1};
pub use self::initial::Initial;
pub use self::map::Map;
pub use self::reduce::{Any, Average, Extremum, ExtremumBy, Junction, Product, Sum};
pub use self::scan::{Scan, Scan1};
pub use self::sequence::{Pull, Sequence};
pub use self::source::{Deferred, Iter, Once, Resolved, deferred, iter, once, resolved};
pub use self::take::{Skip, SkipWhile, Take, TakeWhile};
pub use self::zip::Zip;

use std::future::Future;

/// Combinator and consumer methods for every [`Sequence`].
///
/// Callback-taking methods accept closures returning futures; wrap a plain
/// value in [`std::future::ready`] for a synchronous callback. Predicates
/// and selectors that visit elements in order also receive a zero-based
/// index, incremented once per element the callback actually sees.
pub trait SequenceExt: Sequence {
    /// Pulls the next element.
    ///
    /// Resolves to `Some(element)` or `None` on exhaustion. Further calls
    /// after `None` keep resolving to `None`.
    fn next(&mut self) -> Pull<'_, Self>
    where
        Self: Unpin,
    {
        Pull::new(self)
    }

    /// Yields `f(element, index)` for each element, awaiting `f` before
    /// yielding.
    fn map<F, Fut, B>(self, f: F) -> Map<Self, F, Fut>
    where
        F: FnMut(Self::Item, usize) -> Fut,
        Fut: Future<Output = B>,
        Self: Sized,
    {
        Map::new(self, f)
    }

    /// Like [`fold`](Self::fold), but yields every intermediate
    /// accumulator value instead of only the final one.
    fn scan<Acc, F, Fut>(self, init: Acc, f: F) -> Scan<Self, F, Fut, Acc>
    where
        F: FnMut(Acc, Self::Item, usize) -> Fut,
        Fut: Future<Output = Acc>,
        Acc: Clone,
        Self: Sized,
    {
        Scan::new(self, init, f)
    }

    /// Like [`scan`](Self::scan), but seeds the accumulator from the first
    /// element, yielding it as-is before folding the rest.
    fn scan1<F, Fut>(self, f: F) -> Scan1<Self, F, Fut>
    where
        F: FnMut(Self::Item, Self::Item, usize) -> Fut,
        Fut: Future<Output = Self::Item>,
        Self::Item: Clone,
        Self: Sized,
    {
        Scan1::new(self, f)
    }

    /// Yields only the elements for which the predicate holds.
    fn filter<P, Fut>(self, pred: P) -> Filter<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        Filter::new(self, pred, false)
    }

    /// Yields only the elements for which the predicate does not hold.
    fn exclude<P, Fut>(self, pred: P) -> Filter<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        Filter::new(self, pred, true)
    }

    /// Unwraps a sequence of options, rejecting every `None` element.
    fn exclude_none<T>(self) -> ExcludeNone<Self>
    where
        Self: Sequence<Item = Option<T>> + Sized,
    {
        ExcludeNone::new(self)
    }

    /// Removes every element equal to the target.
    fn remove(self, target: Self::Item) -> Remove<Self>
    where
        Self::Item: PartialEq,
        Self: Sized,
    {
        Remove::new(self, target)
    }

    /// Skips the first element matching the predicate, exactly once;
    /// everything else, including later matches, is forwarded unchanged.
    fn exclude_first<P, Fut>(self, pred: P) -> ExcludeFirst<Self, P, Fut>
    where
        P: FnMut(&Self::Item) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        ExcludeFirst::new(self, pred)
    }

    /// Skips the first element equal to the target, exactly once.
    fn remove_first(self, target: Self::Item) -> RemoveFirst<Self>
    where
        Self::Item: PartialEq,
        Self: Sized,
    {
        RemoveFirst::new(self, target)
    }

    /// Yields up to `n` elements, then stops pulling. `take(0)` never
    /// pulls the source at all.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, n)
    }

    /// Discards the first `n` elements (or all of them, if the source is
    /// shorter), then forwards the remainder.
    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    /// Discards the first element, forwarding the rest.
    fn tail(self) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, 1)
    }

    /// Yields elements while the predicate holds, stopping permanently at
    /// the first failure. The failing element is consumed and discarded.
    fn take_while<P, Fut>(self, pred: P) -> TakeWhile<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        TakeWhile::new(self, pred, false)
    }

    /// Yields elements until the predicate first holds;
    /// [`take_while`](Self::take_while) with the predicate negated.
    fn take_until<P, Fut>(self, pred: P) -> TakeWhile<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        TakeWhile::new(self, pred, true)
    }

    /// Discards a leading run while the predicate holds, then forwards
    /// everything from the first failing element onward, even elements
    /// that would have matched.
    fn skip_while<P, Fut>(self, pred: P) -> SkipWhile<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        SkipWhile::new(self, pred, false)
    }

    /// Discards a leading run until the predicate first holds;
    /// [`skip_while`](Self::skip_while) with the predicate negated.
    fn skip_until<P, Fut>(self, pred: P) -> SkipWhile<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        SkipWhile::new(self, pred, true)
    }

    /// Yields every element except the last, using one element of
    /// lookahead.
    fn initial(self) -> Initial<Self>
    where
        Self: Sized,
    {
        Initial::new(self)
    }

    /// Yields every element of this sequence, then every element of
    /// `other`.
    fn chain<S2>(self, other: S2) -> Chain<Self, S2>
    where
        S2: Sequence<Item = Self::Item>,
        Self: Sized,
    {
        Chain::new(self, other)
    }

    /// Yields every element of `other` before this sequence.
    fn prepend<S1>(self, other: S1) -> Chain<S1, Self>
    where
        S1: Sequence<Item = Self::Item>,
        Self: Sized,
    {
        Chain::new(other, self)
    }

    /// Appends a single element after the sequence.
    fn push(self, item: Self::Item) -> Chain<Self, Once<Self::Item>>
    where
        Self: Sized,
    {
        Chain::new(self, once(item))
    }

    /// Prepends a single element before the sequence.
    fn unshift(self, item: Self::Item) -> Chain<Once<Self::Item>, Self>
    where
        Self: Sized,
    {
        Chain::new(once(item), self)
    }

    /// Concatenates the inner sequences of a sequence of sequences, fully
    /// exhausting each before requesting the next.
    fn flatten(self) -> Flatten<Self, Self::Item>
    where
        Self::Item: Sequence,
        Self: Sized,
    {
        Flatten::new(self)
    }

    /// Maps each element to a sub-sequence and flattens the results in
    /// order. Equivalent to `self.map(f).flatten()`.
    fn flat_map<F, Fut>(self, f: F) -> FlatMap<Self, F, Fut>
    where
        F: FnMut(Self::Item, usize) -> Fut,
        Fut: Future,
        Fut::Output: Sequence,
        Self: Sized,
    {
        FlatMap::new(self, f)
    }

    /// Pairs elements with another sequence until either ends.
    fn zip<S2>(self, other: S2) -> Zip<Self, S2>
    where
        S2: Sequence,
        Self: Sized,
    {
        Zip::new(self, other)
    }

    /// Collects every element into a `Vec`, in order.
    fn to_vec(self) -> Collect<Self, Vec<Self::Item>>
    where
        Self: Sized,
    {
        Collect::new(self)
    }

    /// Collects every element into any collection that implements
    /// `Default + Extend`.
    fn collect<C>(self) -> Collect<Self, C>
    where
        C: Default + Extend<Self::Item>,
        Self: Sized,
    {
        Collect::new(self)
    }

    /// Collects a sequence of options into `Some(Vec<T>)`, or `None` the
    /// instant any element is `None`, discarding the partial list.
    fn all_some<T>(self) -> AllSome<Self, T>
    where
        Self: Sequence<Item = Option<T>> + Sized,
    {
        AllSome::new(self)
    }

    /// Threads an accumulator through `f(accumulator, element, index)`
    /// for every element. An empty sequence resolves to the seed.
    fn fold<Acc, F, Fut>(self, init: Acc, f: F) -> Fold<Self, F, Fut, Acc>
    where
        F: FnMut(Acc, Self::Item, usize) -> Fut,
        Fut: Future<Output = Acc>,
        Self: Sized,
    {
        Fold::new(self, init, f)
    }

    /// Like [`fold`](Self::fold), but seeds the accumulator from the
    /// first element; the index counter starts at 1 for the second
    /// element. An empty sequence is an error, never a silent default.
    fn fold1<F, Fut>(self, f: F) -> Fold1<Self, F, Fut>
    where
        F: FnMut(Self::Item, Self::Item, usize) -> Fut,
        Fut: Future<Output = Self::Item>,
        Self: Sized,
    {
        Fold1::new(self, f)
    }

    /// Resolves to the first element satisfying the predicate, pulling no
    /// further once found.
    fn find<P, Fut>(self, pred: P) -> Find<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        Find::new(self, pred)
    }

    /// Resolves to the zero-based index of the first element satisfying
    /// the predicate.
    fn position<P, Fut>(self, pred: P) -> Position<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        Position::new(self, pred)
    }

    /// Resolves to the element at the zero-based position, or `None` if
    /// the sequence is shorter.
    fn nth(self, n: usize) -> Nth<Self>
    where
        Self: Sized,
    {
        Nth::new(self, n)
    }

    /// Resolves to true the instant an element equal to the target is
    /// pulled.
    fn contains(self, target: Self::Item) -> Contains<Self>
    where
        Self::Item: PartialEq,
        Self: Sized,
    {
        Contains::new(self, target)
    }

    /// Resolves to the zero-based index of the first element equal to the
    /// target.
    fn index_of(self, target: Self::Item) -> IndexOf<Self>
    where
        Self::Item: PartialEq,
        Self: Sized,
    {
        IndexOf::new(self, target)
    }

    /// Resolves to the first element, pulling exactly once.
    fn first(self) -> First<Self>
    where
        Self: Sized,
    {
        First::new(self)
    }

    /// Resolves to the last element, pulling to exhaustion.
    fn last(self) -> Last<Self>
    where
        Self: Sized,
    {
        Last::new(self)
    }

    /// Resolves to the sole element of a one-element sequence, else
    /// `None`. Pulls at most twice.
    fn only(self) -> Only<Self>
    where
        Self: Sized,
    {
        Only::new(self)
    }

    /// Resolves to true if the sequence has no elements. Pulls once.
    fn is_empty(self) -> IsEmpty<Self>
    where
        Self: Sized,
    {
        IsEmpty::new(self, false)
    }

    /// Resolves to true if the sequence has at least one element. Pulls
    /// once.
    fn is_not_empty(self) -> IsEmpty<Self>
    where
        Self: Sized,
    {
        IsEmpty::new(self, true)
    }

    /// Resolves to the number of elements, pulling to exhaustion.
    fn count(self) -> Count<Self>
    where
        Self: Sized,
    {
        Count::new(self)
    }

    /// Resolves to the sum of all elements; `0.0` for an empty sequence.
    fn sum(self) -> Sum<Self>
    where
        Self::Item: Into<f64>,
        Self: Sized,
    {
        Sum::new(self)
    }

    /// Resolves to the product of all elements; `1.0` for an empty
    /// sequence.
    fn product(self) -> Product<Self>
    where
        Self::Item: Into<f64>,
        Self: Sized,
    {
        Product::new(self)
    }

    /// Resolves to the arithmetic mean, or `None` for an empty sequence.
    fn average(self) -> Average<Self>
    where
        Self::Item: Into<f64>,
        Self: Sized,
    {
        Average::new(self)
    }

    /// Resolves to the largest element, or `None` for an empty sequence.
    /// Ties keep the first occurrence.
    fn maximum(self) -> Extremum<Self>
    where
        Self::Item: PartialOrd,
        Self: Sized,
    {
        Extremum::new(self, true)
    }

    /// Resolves to the smallest element, or `None` for an empty sequence.
    /// Ties keep the first occurrence.
    fn minimum(self) -> Extremum<Self>
    where
        Self::Item: PartialOrd,
        Self: Sized,
    {
        Extremum::new(self, false)
    }

    /// Resolves to the element whose selected key is largest. Ties keep
    /// the first occurrence; `None` for an empty sequence.
    fn maximum_by_key<F, Fut, K>(self, selector: F) -> ExtremumBy<Self, F, Fut, K>
    where
        F: FnMut(&Self::Item) -> Fut,
        Fut: Future<Output = K>,
        K: PartialOrd,
        Self: Sized,
    {
        ExtremumBy::new(self, selector, true)
    }

    /// Resolves to the element whose selected key is smallest. Ties keep
    /// the first occurrence; `None` for an empty sequence.
    fn minimum_by_key<F, Fut, K>(self, selector: F) -> ExtremumBy<Self, F, Fut, K>
    where
        F: FnMut(&Self::Item) -> Fut,
        Fut: Future<Output = K>,
        K: PartialOrd,
        Self: Sized,
    {
        ExtremumBy::new(self, selector, false)
    }

    /// Resolves to true iff no element is false. Short-circuits on the
    /// first false; an empty sequence is true.
    fn and(self) -> Junction<Self>
    where
        Self: Sequence<Item = bool> + Sized,
    {
        Junction::new(self, false)
    }

    /// Resolves to true iff some element is true. Short-circuits on the
    /// first true; an empty sequence is false.
    fn or(self) -> Junction<Self>
    where
        Self: Sequence<Item = bool> + Sized,
    {
        Junction::new(self, true)
    }

    /// Resolves to true iff some element satisfies the predicate;
    /// short-circuits on the first match.
    fn any<P, Fut>(self, pred: P) -> Any<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        Any::new(self, pred, false)
    }

    /// Resolves to true iff every element satisfies the predicate;
    /// short-circuits on the first failure.
    fn all<P, Fut>(self, pred: P) -> Any<Self, P, Fut>
    where
        P: FnMut(&Self::Item, usize) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        Any::new(self, pred, true)
    }

    /// Resolves to true iff both sequences yield equal elements and
    /// exhaust simultaneously. Each step pulls this sequence, then
    /// `other`; no further pulls once falsity is determined.
    fn eq<S2>(self, other: S2) -> Equal<Self, S2>
    where
        S2: Sequence,
        Self::Item: PartialEq<S2::Item>,
        Self: Sized,
    {
        Equal::new(self, other, false)
    }

    /// [`eq`](Self::eq) with the result negated.
    fn ne<S2>(self, other: S2) -> Equal<Self, S2>
    where
        S2: Sequence,
        Self::Item: PartialEq<S2::Item>,
        Self: Sized,
    {
        Equal::new(self, other, true)
    }

    /// [`eq`](Self::eq) with each pair judged by a caller-supplied
    /// comparator, awaited per pair.
    fn eq_by<S2, F, Fut>(self, other: S2, cmp: F) -> EqualBy<Self, S2, F, Fut>
    where
        S2: Sequence,
        F: FnMut(Self::Item, S2::Item) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        EqualBy::new(self, other, cmp)
    }

    /// Resolves to true iff `prefix`'s elements match this sequence's
    /// elements pairwise up to `prefix`'s length. True whenever `prefix`
    /// is empty.
    fn starts_with<S2>(self, prefix: S2) -> StartsWith<Self, S2>
    where
        S2: Sequence,
        Self::Item: PartialEq<S2::Item>,
        Self: Sized,
    {
        StartsWith::new(self, prefix)
    }

    /// [`starts_with`](Self::starts_with) with a caller-supplied
    /// comparator for each pair.
    fn starts_with_by<S2, F, Fut>(self, prefix: S2, cmp: F) -> StartsWithBy<Self, S2, F, Fut>
    where
        S2: Sequence,
        F: FnMut(Self::Item, S2::Item) -> Fut,
        Fut: Future<Output = bool>,
        Self: Sized,
    {
        StartsWithBy::new(self, prefix, cmp)
    }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}
