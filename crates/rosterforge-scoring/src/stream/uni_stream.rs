//! Zero-erasure uni-constraint stream over a single fact collection.

use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::ImpactType;

use crate::constraint::{IncrementalUniConstraint, PairMode};

use super::bi_stream::BiConstraintStream;
use super::builder::ConstraintBuilder;
use super::collector::UniCollector;
use super::cross_bi_stream::CrossBiConstraintStream;
use super::filter::{AndUniFilter, FnUniFilter, TrueFilter, UniFilter};
use super::grouped_stream::GroupedConstraintStream;
use super::joiner::EqualJoiner;

/// Stream over the facts of one collection, accumulating filters.
///
/// Filters added here run before any join or grouping, so facts they
/// reject are never indexed.
pub struct UniConstraintStream<S, A, E, F, Sc>
where
    Sc: Score,
{
    pub(crate) descriptor_index: usize,
    pub(crate) extractor: E,
    pub(crate) filter: F,
    _phantom: PhantomData<(fn() -> S, fn() -> A, fn() -> Sc)>,
}

impl<S, A, E, Sc> UniConstraintStream<S, A, E, TrueFilter, Sc>
where
    E: Fn(&S) -> &[A] + Send + Sync,
    Sc: Score,
{
    pub(crate) fn new(descriptor_index: usize, extractor: E) -> Self {
        Self {
            descriptor_index,
            extractor,
            filter: TrueFilter,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, E, F, Sc> UniConstraintStream<S, A, E, F, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    E: Fn(&S) -> &[A] + Send + Sync,
    F: UniFilter<S, A>,
    Sc: Score,
{
    /// Keeps facts matching `predicate`.
    pub fn filter<P>(
        self,
        predicate: P,
    ) -> UniConstraintStream<
        S,
        A,
        E,
        AndUniFilter<F, FnUniFilter<impl Fn(&S, &A) -> bool + Send + Sync>>,
        Sc,
    >
    where
        P: Fn(&A) -> bool + Send + Sync,
    {
        self.filter_with_solution(move |_: &S, a: &A| predicate(a))
    }

    /// Keeps facts matching `predicate`, which may read the whole solution.
    pub fn filter_with_solution<P>(
        self,
        predicate: P,
    ) -> UniConstraintStream<S, A, E, AndUniFilter<F, FnUniFilter<P>>, Sc>
    where
        P: Fn(&S, &A) -> bool + Send + Sync,
    {
        UniConstraintStream {
            descriptor_index: self.descriptor_index,
            extractor: self.extractor,
            filter: AndUniFilter::new(self.filter, FnUniFilter::new(predicate)),
            _phantom: PhantomData,
        }
    }

    /// Pairs distinct facts of this collection that share the joiner's key.
    ///
    /// Filters accumulated so far apply to each fact before pairing.
    pub fn join_self<K, KE>(
        self,
        joiner: EqualJoiner<KE, KE, K>,
        mode: PairMode,
    ) -> BiConstraintStream<S, A, K, E, KE, F, TrueFilter, Sc>
    where
        K: Eq + Hash + Clone + Send + Sync,
        KE: Fn(&A) -> K + Send + Sync,
    {
        let (key, _) = joiner.into_keys();
        BiConstraintStream::new(
            self.descriptor_index,
            mode,
            self.extractor,
            key,
            self.filter,
        )
    }

    /// Joins with the facts of another collection sharing the joiner's key.
    pub fn join<B, EB, K, KA, KB>(
        self,
        descriptor_b: usize,
        extractor_b: EB,
        joiner: EqualJoiner<KA, KB, K>,
    ) -> CrossBiConstraintStream<S, A, B, K, E, EB, KA, KB, F, TrueFilter, TrueFilter, Sc>
    where
        B: Clone + Send + Sync + 'static,
        EB: Fn(&S) -> &[B] + Send + Sync,
        K: Eq + Hash + Clone + Send + Sync,
        KA: Fn(&A) -> K + Send + Sync,
        KB: Fn(&B) -> K + Send + Sync,
    {
        let (key_a, key_b) = joiner.into_keys();
        CrossBiConstraintStream::new(
            (self.descriptor_index, descriptor_b),
            (self.extractor, extractor_b),
            (key_a, key_b),
            self.filter,
        )
    }

    /// Groups facts by key and reduces each group with `collector`.
    pub fn group_by<K, KF, C>(
        self,
        key_fn: KF,
        collector: C,
    ) -> GroupedConstraintStream<S, A, K, E, F, KF, C, TrueFilter, Sc>
    where
        K: Clone + Eq + Hash + Send + Sync,
        KF: Fn(&A) -> K + Send + Sync,
        C: UniCollector<A>,
    {
        GroupedConstraintStream::new(
            self.descriptor_index,
            self.extractor,
            self.filter,
            key_fn,
            collector,
        )
    }

    /// Penalizes each matching fact by `weight`.
    pub fn penalize(self, weight: Sc) -> ConstraintBuilder<Self, impl Fn(&A) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, |_: &A| 1_i64)
    }

    /// Penalizes each matching fact by `weight * magnitude(fact)`.
    pub fn penalize_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&A) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, magnitude)
    }

    /// Rewards each matching fact by `weight`.
    pub fn reward(self, weight: Sc) -> ConstraintBuilder<Self, impl Fn(&A) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, |_: &A| 1_i64)
    }

    /// Rewards each matching fact by `weight * magnitude(fact)`.
    pub fn reward_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&A) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, magnitude)
    }
}

impl<S, A, E, F, M, Sc> ConstraintBuilder<UniConstraintStream<S, A, E, F, Sc>, M, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    E: Fn(&S) -> &[A] + Send + Sync,
    F: UniFilter<S, A>,
    M: Fn(&A) -> i64 + Send + Sync,
    Sc: Score,
{
    /// Finalizes into an [`IncrementalUniConstraint`].
    pub fn as_constraint(self, name: &str) -> IncrementalUniConstraint<S, A, E, F, M, Sc> {
        let constraint_ref = self.constraint_ref(name);
        let is_hard = self.is_hard();
        IncrementalUniConstraint::new(
            constraint_ref,
            self.impact_type,
            self.stream.descriptor_index,
            self.stream.extractor,
            self.stream.filter,
            self.magnitude,
            self.weight,
            is_hard,
        )
    }
}

impl<S, A, E, F, Sc: Score> std::fmt::Debug for UniConstraintStream<S, A, E, F, Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniConstraintStream")
            .field("descriptor_index", &self.descriptor_index)
            .finish()
    }
}
