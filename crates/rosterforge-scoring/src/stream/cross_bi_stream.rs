//! Zero-erasure cross-bi-constraint stream joining two fact collections.

use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::ImpactType;

use crate::constraint::IncrementalCrossBiConstraint;

use super::builder::ConstraintBuilder;
use super::filter::{AndBiFilter, BiFilter, FnBiFilter, JoinerFilter, TrueFilter, UniFilter};
use super::joiner::Joiner;

/// Stream over pairs `(a, b)` from two collections sharing a key.
///
/// `FA` and `FB` filter each side before indexing; `F` filters pairs.
///
/// ```
/// use rosterforge_core::SimpleScore;
/// use rosterforge_scoring::api::constraint_set::IncrementalConstraint;
/// use rosterforge_scoring::stream::joiner::equal_bi;
/// use rosterforge_scoring::stream::ConstraintFactory;
///
/// #[derive(Clone, Debug)]
/// struct Leave { employee: usize, day: u32 }
/// #[derive(Clone, Debug)]
/// struct Shift { employee: Option<usize>, day: u32 }
///
/// struct Roster { leaves: Vec<Leave>, shifts: Vec<Shift> }
///
/// let constraint = ConstraintFactory::<Roster, SimpleScore>::new()
///     .for_each(1, |r: &Roster| r.leaves.as_slice())
///     .join(0, |r: &Roster| r.shifts.as_slice(), equal_bi(|l: &Leave| Some(l.employee), |s: &Shift| s.employee))
///     .filter(|l: &Leave, s: &Shift| l.day == s.day)
///     .penalize(SimpleScore::of(5))
///     .as_constraint("Working on leave");
///
/// let roster = Roster {
///     leaves: vec![Leave { employee: 0, day: 3 }],
///     shifts: vec![
///         Shift { employee: Some(0), day: 3 },
///         Shift { employee: Some(0), day: 4 },
///         Shift { employee: None, day: 3 },
///     ],
/// };
/// assert_eq!(constraint.evaluate(&roster), SimpleScore::of(-5));
/// ```
pub struct CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, FB, F, Sc>
where
    Sc: Score,
{
    descriptors: (usize, usize),
    extractors: (EA, EB),
    keys: (KA, KB),
    side_filters: (FA, FB),
    filter: F,
    _phantom: PhantomData<(fn() -> S, fn() -> (A, B), fn() -> K, fn() -> Sc)>,
}

impl<S, A, B, K, EA, EB, KA, KB, FA, Sc>
    CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, TrueFilter, TrueFilter, Sc>
where
    Sc: Score,
{
    pub(crate) fn new(
        descriptors: (usize, usize),
        extractors: (EA, EB),
        keys: (KA, KB),
        filter_a: FA,
    ) -> Self {
        Self {
            descriptors,
            extractors,
            keys,
            side_filters: (filter_a, TrueFilter),
            filter: TrueFilter,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, B, K, EA, EB, KA, KB, FA, FB, F, Sc>
    CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, FB, F, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    K: Eq + Hash + Clone + Send + Sync,
    EA: Fn(&S) -> &[A] + Send + Sync,
    EB: Fn(&S) -> &[B] + Send + Sync,
    KA: Fn(&A) -> K + Send + Sync,
    KB: Fn(&B) -> K + Send + Sync,
    FA: UniFilter<S, A>,
    FB: UniFilter<S, B>,
    F: BiFilter<S, A, B>,
    Sc: Score,
{
    /// Adds a joiner checked per candidate pair.
    pub fn and_join<J>(
        self,
        joiner: J,
    ) -> CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, FB, AndBiFilter<F, JoinerFilter<J>>, Sc>
    where
        J: Joiner<A, B>,
    {
        self.with_filter(JoinerFilter::new(joiner))
    }

    /// Keeps pairs matching `predicate`.
    pub fn filter<P>(
        self,
        predicate: P,
    ) -> CrossBiConstraintStream<
        S,
        A,
        B,
        K,
        EA,
        EB,
        KA,
        KB,
        FA,
        FB,
        AndBiFilter<F, FnBiFilter<impl Fn(&S, &A, &B) -> bool + Send + Sync>>,
        Sc,
    >
    where
        P: Fn(&A, &B) -> bool + Send + Sync,
    {
        self.with_filter(FnBiFilter::new(move |_: &S, a: &A, b: &B| predicate(a, b)))
    }

    fn with_filter<G>(
        self,
        next: G,
    ) -> CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, FB, AndBiFilter<F, G>, Sc>
    where
        G: BiFilter<S, A, B>,
    {
        CrossBiConstraintStream {
            descriptors: self.descriptors,
            extractors: self.extractors,
            keys: self.keys,
            side_filters: self.side_filters,
            filter: AndBiFilter::new(self.filter, next),
            _phantom: PhantomData,
        }
    }

    /// Penalizes each matching pair by `weight`.
    pub fn penalize(
        self,
        weight: Sc,
    ) -> ConstraintBuilder<Self, impl Fn(&A, &B) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, |_: &A, _: &B| 1_i64)
    }

    /// Penalizes each matching pair by `weight * magnitude(a, b)`.
    pub fn penalize_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&A, &B) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, magnitude)
    }

    /// Rewards each matching pair by `weight`.
    pub fn reward(
        self,
        weight: Sc,
    ) -> ConstraintBuilder<Self, impl Fn(&A, &B) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, |_: &A, _: &B| 1_i64)
    }

    /// Rewards each matching pair by `weight * magnitude(a, b)`.
    pub fn reward_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&A, &B) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, magnitude)
    }
}

impl<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc>
    ConstraintBuilder<CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, FB, F, Sc>, M, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    K: Eq + Hash + Clone + Send + Sync,
    EA: Fn(&S) -> &[A] + Send + Sync,
    EB: Fn(&S) -> &[B] + Send + Sync,
    KA: Fn(&A) -> K + Send + Sync,
    KB: Fn(&B) -> K + Send + Sync,
    FA: UniFilter<S, A>,
    FB: UniFilter<S, B>,
    F: BiFilter<S, A, B>,
    M: Fn(&A, &B) -> i64 + Send + Sync,
    Sc: Score,
{
    /// Finalizes into an [`IncrementalCrossBiConstraint`].
    pub fn as_constraint(
        self,
        name: &str,
    ) -> IncrementalCrossBiConstraint<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc> {
        let constraint_ref = self.constraint_ref(name);
        let is_hard = self.is_hard();
        let stream = self.stream;
        IncrementalCrossBiConstraint::new(
            constraint_ref,
            self.impact_type,
            stream.descriptors,
            stream.extractors,
            stream.keys,
            stream.side_filters,
            stream.filter,
            self.magnitude,
            self.weight,
            is_hard,
        )
    }
}

impl<S, A, B, K, EA, EB, KA, KB, FA, FB, F, Sc: Score> std::fmt::Debug
    for CrossBiConstraintStream<S, A, B, K, EA, EB, KA, KB, FA, FB, F, Sc>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossBiConstraintStream")
            .field("descriptors", &self.descriptors)
            .finish()
    }
}
