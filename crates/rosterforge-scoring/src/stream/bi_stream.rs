//! Zero-erasure bi-constraint stream for self-joins.

use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::ImpactType;

use crate::constraint::{IncrementalBiConstraint, PairMode};

use super::builder::ConstraintBuilder;
use super::filter::{AndBiFilter, BiFilter, FnBiFilter, JoinerFilter, TrueFilter, UniFilter};
use super::joiner::Joiner;

/// Stream over pairs of distinct facts from one collection sharing a key.
///
/// `FU` filters single facts before indexing; `FB` filters candidate pairs.
pub struct BiConstraintStream<S, A, K, E, KE, FU, FB, Sc>
where
    Sc: Score,
{
    pub(crate) descriptor_index: usize,
    pub(crate) mode: PairMode,
    pub(crate) extractor: E,
    pub(crate) key: KE,
    pub(crate) pre_filter: FU,
    pub(crate) filter: FB,
    _phantom: PhantomData<(fn() -> S, fn() -> A, fn() -> K, fn() -> Sc)>,
}

impl<S, A, K, E, KE, FU, Sc> BiConstraintStream<S, A, K, E, KE, FU, TrueFilter, Sc>
where
    Sc: Score,
{
    pub(crate) fn new(
        descriptor_index: usize,
        mode: PairMode,
        extractor: E,
        key: KE,
        pre_filter: FU,
    ) -> Self {
        Self {
            descriptor_index,
            mode,
            extractor,
            key,
            pre_filter,
            filter: TrueFilter,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, K, E, KE, FU, FB, Sc> BiConstraintStream<S, A, K, E, KE, FU, FB, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    K: Eq + Hash + Clone + Send + Sync,
    E: Fn(&S) -> &[A] + Send + Sync,
    KE: Fn(&A) -> K + Send + Sync,
    FU: UniFilter<S, A>,
    FB: BiFilter<S, A, A>,
    Sc: Score,
{
    /// Adds a joiner checked per candidate pair.
    pub fn and_join<J>(
        self,
        joiner: J,
    ) -> BiConstraintStream<S, A, K, E, KE, FU, AndBiFilter<FB, JoinerFilter<J>>, Sc>
    where
        J: Joiner<A, A>,
    {
        self.with_filter(JoinerFilter::new(joiner))
    }

    /// Keeps pairs matching `predicate`.
    pub fn filter<P>(
        self,
        predicate: P,
    ) -> BiConstraintStream<
        S,
        A,
        K,
        E,
        KE,
        FU,
        AndBiFilter<FB, FnBiFilter<impl Fn(&S, &A, &A) -> bool + Send + Sync>>,
        Sc,
    >
    where
        P: Fn(&A, &A) -> bool + Send + Sync,
    {
        self.with_filter(FnBiFilter::new(move |_: &S, a: &A, b: &A| predicate(a, b)))
    }

    fn with_filter<G>(self, next: G) -> BiConstraintStream<S, A, K, E, KE, FU, AndBiFilter<FB, G>, Sc>
    where
        G: BiFilter<S, A, A>,
    {
        BiConstraintStream {
            descriptor_index: self.descriptor_index,
            mode: self.mode,
            extractor: self.extractor,
            key: self.key,
            pre_filter: self.pre_filter,
            filter: AndBiFilter::new(self.filter, next),
            _phantom: PhantomData,
        }
    }

    /// Penalizes each matching pair by `weight`.
    pub fn penalize(
        self,
        weight: Sc,
    ) -> ConstraintBuilder<Self, impl Fn(&A, &A) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, |_: &A, _: &A| 1_i64)
    }

    /// Penalizes each matching pair by `weight * magnitude(a, b)`.
    pub fn penalize_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&A, &A) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, magnitude)
    }

    /// Rewards each matching pair by `weight`.
    pub fn reward(
        self,
        weight: Sc,
    ) -> ConstraintBuilder<Self, impl Fn(&A, &A) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, |_: &A, _: &A| 1_i64)
    }

    /// Rewards each matching pair by `weight * magnitude(a, b)`.
    pub fn reward_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&A, &A) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, magnitude)
    }
}

impl<S, A, K, E, KE, FU, FB, M, Sc>
    ConstraintBuilder<BiConstraintStream<S, A, K, E, KE, FU, FB, Sc>, M, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    K: Eq + Hash + Clone + Send + Sync,
    E: Fn(&S) -> &[A] + Send + Sync,
    KE: Fn(&A) -> K + Send + Sync,
    FU: UniFilter<S, A>,
    FB: BiFilter<S, A, A>,
    M: Fn(&A, &A) -> i64 + Send + Sync,
    Sc: Score,
{
    /// Finalizes into an [`IncrementalBiConstraint`].
    pub fn as_constraint(self, name: &str) -> IncrementalBiConstraint<S, A, K, E, KE, FU, FB, M, Sc> {
        let constraint_ref = self.constraint_ref(name);
        let is_hard = self.is_hard();
        let stream = self.stream;
        IncrementalBiConstraint::new(
            constraint_ref,
            self.impact_type,
            stream.descriptor_index,
            stream.mode,
            stream.extractor,
            stream.key,
            stream.pre_filter,
            stream.filter,
            self.magnitude,
            self.weight,
            is_hard,
        )
    }
}

impl<S, A, K, E, KE, FU, FB, Sc: Score> std::fmt::Debug
    for BiConstraintStream<S, A, K, E, KE, FU, FB, Sc>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiConstraintStream")
            .field("descriptor_index", &self.descriptor_index)
            .field("mode", &self.mode)
            .finish()
    }
}
