//! Aseq: lazy, pull-based combinators for asynchronous sequences.
//!
//! # Overview
//!
//! An asynchronous sequence is an ordered, single-pass series of elements
//! realized over time. This crate provides the canonical [`Sequence`] trait
//! (a stateful "pull the next element or signal exhaustion" protocol), source
//! adapters that normalize heterogeneous inputs into it, lazy combinators
//! that wrap one sequence to produce another, and terminal consumers that
//! drive a pipeline to completion.
//!
//! # Core Guarantees
//!
//! - **Laziness**: no element is produced, and no pull issued, until a
//!   terminal consumer demands it. `take(0)` never touches its source.
//! - **Strict ordering**: pulls happen one at a time in program order; dual
//!   sequence comparators always pull A then B each step.
//! - **Short-circuiting**: consumers stop pulling the instant the answer is
//!   determined (`find`, `any`, `eq`, `only`, ...).
//! - **Sticky exhaustion**: once a sequence signals the end, every further
//!   pull signals the end without re-polling the source.
//! - **No hidden buffering**: lookahead needed by a combinator (one element
//!   for [`initial`](seq::SequenceExt::initial)) is buffered inside that
//!   combinator, never by rewinding the cursor.
//!
//! # Module Structure
//!
//! - [`seq`]: the sequence trait, sources, combinators, and consumers
//! - [`error`](mod@error): error types
//!
//! # Examples
//!
//! ```ignore
//! use aseq::{iter, SequenceExt};
//! use std::future::ready;
//!
//! let doubled: Vec<i32> = iter([1, 2, 3, 4])
//!     .filter(|n, _i| ready(n % 2 == 0))
//!     .map(|n, _i| ready(n * 10))
//!     .to_vec()
//!     .await;
//! assert_eq!(doubled, vec![20, 40]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_inception)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod seq;

#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

pub use error::EmptySequenceError;
pub use seq::{Sequence, SequenceExt, deferred, iter, once, resolved};
