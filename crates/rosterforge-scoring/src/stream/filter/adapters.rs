//! Adapters from joiners to filters.

use crate::stream::joiner::Joiner;

use super::traits::BiFilter;

/// Uses a joiner as a pair filter, ignoring the solution.
///
/// Non-equality joiners cannot be indexed, so join streams check them
/// per candidate pair through this adapter.
pub struct JoinerFilter<J> {
    joiner: J,
}

impl<J> JoinerFilter<J> {
    #[inline]
    pub fn new(joiner: J) -> Self {
        Self { joiner }
    }
}

impl<S, A, B, J> BiFilter<S, A, B> for JoinerFilter<J>
where
    J: Joiner<A, B>,
{
    #[inline]
    fn test(&self, _: &S, a: &A, b: &B) -> bool {
        self.joiner.matches(a, b)
    }
}
