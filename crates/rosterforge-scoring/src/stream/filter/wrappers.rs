//! Constant and closure filters.

use super::traits::{BiFilter, UniFilter};

/// Accepts everything. The starting point of every filter chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrueFilter;

impl<S, A> UniFilter<S, A> for TrueFilter {
    #[inline]
    fn test(&self, _: &S, _: &A) -> bool {
        true
    }
}

impl<S, A, B> BiFilter<S, A, B> for TrueFilter {
    #[inline]
    fn test(&self, _: &S, _: &A, _: &B) -> bool {
        true
    }
}

/// A uni-filter wrapping a closure over the solution and the fact.
///
/// ```
/// use rosterforge_scoring::stream::filter::{FnUniFilter, UniFilter};
///
/// struct Config { max_minutes: i64 }
///
/// let within_cap = FnUniFilter::new(|c: &Config, minutes: &i64| *minutes <= c.max_minutes);
/// let config = Config { max_minutes: 480 };
/// assert!(within_cap.test(&config, &480));
/// assert!(!within_cap.test(&config, &481));
/// ```
pub struct FnUniFilter<F> {
    f: F,
}

impl<F> FnUniFilter<F> {
    #[inline]
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<S, A, F> UniFilter<S, A> for FnUniFilter<F>
where
    F: Fn(&S, &A) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, solution: &S, a: &A) -> bool {
        (self.f)(solution, a)
    }
}

/// A bi-filter wrapping a closure over the solution and both sides.
pub struct FnBiFilter<F> {
    f: F,
}

impl<F> FnBiFilter<F> {
    #[inline]
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<S, A, B, F> BiFilter<S, A, B> for FnBiFilter<F>
where
    F: Fn(&S, &A, &B) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, solution: &S, a: &A, b: &B) -> bool {
        (self.f)(solution, a, b)
    }
}
