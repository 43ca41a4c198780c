//! AND composition of filters.

use super::traits::{BiFilter, UniFilter};

/// Both uni-filters must pass. The first short-circuits the second.
///
/// ```
/// use rosterforge_scoring::stream::filter::{AndUniFilter, FnUniFilter, UniFilter};
///
/// let assigned = FnUniFilter::new(|_: &(), e: &Option<usize>| e.is_some());
/// let not_first = FnUniFilter::new(|_: &(), e: &Option<usize>| *e != Some(0));
/// let both = AndUniFilter::new(assigned, not_first);
///
/// assert!(both.test(&(), &Some(2)));
/// assert!(!both.test(&(), &Some(0)));
/// assert!(!both.test(&(), &None));
/// ```
pub struct AndUniFilter<F1, F2> {
    first: F1,
    second: F2,
}

impl<F1, F2> AndUniFilter<F1, F2> {
    #[inline]
    pub fn new(first: F1, second: F2) -> Self {
        Self { first, second }
    }
}

impl<S, A, F1, F2> UniFilter<S, A> for AndUniFilter<F1, F2>
where
    F1: UniFilter<S, A>,
    F2: UniFilter<S, A>,
{
    #[inline]
    fn test(&self, solution: &S, a: &A) -> bool {
        self.first.test(solution, a) && self.second.test(solution, a)
    }
}

/// Both bi-filters must pass.
pub struct AndBiFilter<F1, F2> {
    first: F1,
    second: F2,
}

impl<F1, F2> AndBiFilter<F1, F2> {
    #[inline]
    pub fn new(first: F1, second: F2) -> Self {
        Self { first, second }
    }
}

impl<S, A, B, F1, F2> BiFilter<S, A, B> for AndBiFilter<F1, F2>
where
    F1: BiFilter<S, A, B>,
    F2: BiFilter<S, A, B>,
{
    #[inline]
    fn test(&self, solution: &S, a: &A, b: &B) -> bool {
        self.first.test(solution, a, b) && self.second.test(solution, a, b)
    }
}
