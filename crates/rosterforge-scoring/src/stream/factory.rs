//! Constraint factory: the entry point of the fluent constraint API.

use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;

use crate::constraint::PairMode;

use super::bi_stream::BiConstraintStream;
use super::filter::TrueFilter;
use super::joiner::EqualJoiner;
use super::uni_stream::UniConstraintStream;

/// Factory for constraint streams over solution `S` scored with `Sc`.
///
/// Every stream starts from a fact collection, identified by its
/// descriptor index and an extractor returning the facts as a slice.
///
/// # Example
///
/// ```
/// use rosterforge_core::SimpleScore;
/// use rosterforge_scoring::api::constraint_set::IncrementalConstraint;
/// use rosterforge_scoring::stream::ConstraintFactory;
///
/// #[derive(Clone, Debug)]
/// struct Shift { employee: Option<usize> }
///
/// struct Roster { shifts: Vec<Shift> }
///
/// let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
///     .for_each(0, |r: &Roster| r.shifts.as_slice())
///     .filter(|s: &Shift| s.employee.is_none())
///     .penalize(SimpleScore::of(1))
///     .as_constraint("Assign every shift");
///
/// let roster = Roster { shifts: vec![Shift { employee: Some(0) }, Shift { employee: None }] };
/// assert_eq!(constraint.evaluate(&roster), SimpleScore::of(-1));
/// ```
pub struct ConstraintFactory<S, Sc: Score> {
    _phantom: PhantomData<fn(&S) -> Sc>,
}

impl<S, Sc> ConstraintFactory<S, Sc>
where
    S: Send + Sync,
    Sc: Score,
{
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Starts a stream over every fact of one collection.
    pub fn for_each<A, E>(
        &self,
        descriptor_index: usize,
        extractor: E,
    ) -> UniConstraintStream<S, A, E, TrueFilter, Sc>
    where
        A: Clone + Send + Sync + 'static,
        E: Fn(&S) -> &[A] + Send + Sync,
    {
        UniConstraintStream::new(descriptor_index, extractor)
    }

    /// Starts a stream over unique pairs of distinct facts sharing a key.
    ///
    /// Shorthand for `for_each(..).join_self(joiner, PairMode::Unique)`.
    ///
    /// ```
    /// use rosterforge_core::SimpleScore;
    /// use rosterforge_scoring::api::constraint_set::IncrementalConstraint;
    /// use rosterforge_scoring::stream::{joiner::equal, ConstraintFactory};
    ///
    /// #[derive(Clone, Debug)]
    /// struct Shift { employee: Option<usize>, start: u32 }
    ///
    /// struct Roster { shifts: Vec<Shift> }
    ///
    /// let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
    ///     .for_each_unique_pair(0, |r: &Roster| r.shifts.as_slice(), equal(|s: &Shift| s.employee))
    ///     .filter(|a: &Shift, b: &Shift| a.start == b.start)
    ///     .penalize(SimpleScore::of(1))
    ///     .as_constraint("Same start");
    ///
    /// let roster = Roster {
    ///     shifts: vec![
    ///         Shift { employee: Some(1), start: 9 },
    ///         Shift { employee: Some(1), start: 9 },
    ///         Shift { employee: Some(2), start: 9 },
    ///     ],
    /// };
    /// // one unordered pair, counted once
    /// assert_eq!(constraint.evaluate(&roster), SimpleScore::of(-1));
    /// ```
    pub fn for_each_unique_pair<A, E, K, KE>(
        &self,
        descriptor_index: usize,
        extractor: E,
        joiner: EqualJoiner<KE, KE, K>,
    ) -> BiConstraintStream<S, A, K, E, KE, TrueFilter, TrueFilter, Sc>
    where
        A: Clone + Send + Sync + 'static,
        E: Fn(&S) -> &[A] + Send + Sync,
        K: Eq + Hash + Clone + Send + Sync,
        KE: Fn(&A) -> K + Send + Sync,
    {
        self.for_each(descriptor_index, extractor)
            .join_self(joiner, PairMode::Unique)
    }
}

impl<S: Send + Sync, Sc: Score> Default for ConstraintFactory<S, Sc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, Sc: Score> std::fmt::Debug for ConstraintFactory<S, Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintFactory").finish()
    }
}
