//! Error types for sequence consumers.

/// A seeded fold was asked to run over a sequence with no elements.
///
/// Returned by [`fold1`](crate::seq::SequenceExt::fold1), which takes its
/// initial accumulator from the first element and therefore has no value to
/// return for an empty input. This is an error rather than a silent default:
/// callers that want a fallback should use
/// [`fold`](crate::seq::SequenceExt::fold) with an explicit seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fold1 requires a sequence with at least one element")]
pub struct EmptySequenceError;
