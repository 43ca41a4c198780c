//! Arbitrary pair predicate as a joiner.

use super::Joiner;

/// Joins when `predicate(a, b)` holds.
///
/// ```
/// use rosterforge_scoring::stream::joiner::{filtering, Joiner};
///
/// let back_to_back = filtering(|a: &(i64, i64), b: &(i64, i64)| a.1 == b.0);
/// assert!(back_to_back.matches(&(6, 14), &(14, 22)));
/// assert!(!back_to_back.matches(&(14, 22), &(6, 14)));
/// ```
pub fn filtering<A, B, F>(predicate: F) -> FilteringJoiner<F>
where
    F: Fn(&A, &B) -> bool + Send + Sync,
{
    FilteringJoiner { predicate }
}

/// Matches when the wrapped predicate holds.
pub struct FilteringJoiner<F> {
    predicate: F,
}

impl<A, B, F> Joiner<A, B> for FilteringJoiner<F>
where
    F: Fn(&A, &B) -> bool + Send + Sync,
{
    #[inline]
    fn matches(&self, a: &A, b: &B) -> bool {
        (self.predicate)(a, b)
    }
}
