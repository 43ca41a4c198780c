//! Zero-erasure grouped constraint stream.

use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::ImpactType;

use crate::constraint::GroupedUniConstraint;

use super::builder::ConstraintBuilder;
use super::collector::UniCollector;
use super::filter::{AndBiFilter, BiFilter, FnBiFilter, TrueFilter, UniFilter};

/// Stream over `(key, result)` groups produced by
/// [`UniConstraintStream::group_by`](super::UniConstraintStream::group_by).
///
/// ```
/// use rosterforge_core::HardMediumSoftScore;
/// use rosterforge_scoring::api::constraint_set::IncrementalConstraint;
/// use rosterforge_scoring::stream::collector::count;
/// use rosterforge_scoring::stream::ConstraintFactory;
///
/// #[derive(Clone, Debug)]
/// struct Shift { employee: usize, day: u32 }
///
/// struct Roster { shifts: Vec<Shift> }
///
/// // More than one shift per employee per day.
/// let constraint = ConstraintFactory::<Roster, HardMediumSoftScore>::new()
///     .for_each(0, |r: &Roster| r.shifts.as_slice())
///     .group_by(|s: &Shift| (s.employee, s.day), count())
///     .filter(|_: &Roster, _: &(usize, u32), n: &usize| *n > 1)
///     .penalize_with(HardMediumSoftScore::ONE_SOFT, |_: &Roster, _: &(usize, u32), n: &usize| *n as i64 - 1)
///     .as_constraint("One shift per day");
///
/// let roster = Roster {
///     shifts: vec![
///         Shift { employee: 0, day: 1 },
///         Shift { employee: 0, day: 1 },
///         Shift { employee: 0, day: 1 },
///         Shift { employee: 1, day: 1 },
///     ],
/// };
/// assert_eq!(constraint.evaluate(&roster), HardMediumSoftScore::of_soft(-2));
/// assert_eq!(constraint.match_count(&roster), 1);
/// ```
pub struct GroupedConstraintStream<S, A, K, E, FU, KF, C, GF, Sc>
where
    Sc: Score,
{
    descriptor_index: usize,
    extractor: E,
    pre_filter: FU,
    key_fn: KF,
    collector: C,
    group_filter: GF,
    _phantom: PhantomData<(fn() -> S, fn() -> A, fn() -> K, fn() -> Sc)>,
}

impl<S, A, K, E, FU, KF, C, Sc> GroupedConstraintStream<S, A, K, E, FU, KF, C, TrueFilter, Sc>
where
    Sc: Score,
{
    pub(crate) fn new(
        descriptor_index: usize,
        extractor: E,
        pre_filter: FU,
        key_fn: KF,
        collector: C,
    ) -> Self {
        Self {
            descriptor_index,
            extractor,
            pre_filter,
            key_fn,
            collector,
            group_filter: TrueFilter,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, K, E, FU, KF, C, GF, Sc> GroupedConstraintStream<S, A, K, E, FU, KF, C, GF, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    K: Clone + Eq + Hash + Send + Sync,
    E: Fn(&S) -> &[A] + Send + Sync,
    FU: UniFilter<S, A>,
    KF: Fn(&A) -> K + Send + Sync,
    C: UniCollector<A>,
    GF: BiFilter<S, K, C::Result>,
    Sc: Score,
{
    /// Keeps groups whose `(key, result)` matches `predicate`.
    ///
    /// The predicate sees the solution so thresholds can come from it.
    pub fn filter<P>(
        self,
        predicate: P,
    ) -> GroupedConstraintStream<S, A, K, E, FU, KF, C, AndBiFilter<GF, FnBiFilter<P>>, Sc>
    where
        P: Fn(&S, &K, &C::Result) -> bool + Send + Sync,
    {
        GroupedConstraintStream {
            descriptor_index: self.descriptor_index,
            extractor: self.extractor,
            pre_filter: self.pre_filter,
            key_fn: self.key_fn,
            collector: self.collector,
            group_filter: AndBiFilter::new(self.group_filter, FnBiFilter::new(predicate)),
            _phantom: PhantomData,
        }
    }

    /// Penalizes each matching group by `weight`.
    pub fn penalize(
        self,
        weight: Sc,
    ) -> ConstraintBuilder<Self, impl Fn(&S, &K, &C::Result) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, |_: &S, _: &K, _: &C::Result| {
            1_i64
        })
    }

    /// Penalizes each matching group by `weight * magnitude(solution, key, result)`.
    pub fn penalize_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&S, &K, &C::Result) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Penalty, weight, magnitude)
    }

    /// Rewards each matching group by `weight`.
    pub fn reward(
        self,
        weight: Sc,
    ) -> ConstraintBuilder<Self, impl Fn(&S, &K, &C::Result) -> i64 + Send + Sync, Sc> {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, |_: &S, _: &K, _: &C::Result| {
            1_i64
        })
    }

    /// Rewards each matching group by `weight * magnitude(solution, key, result)`.
    pub fn reward_with<M>(self, weight: Sc, magnitude: M) -> ConstraintBuilder<Self, M, Sc>
    where
        M: Fn(&S, &K, &C::Result) -> i64 + Send + Sync,
    {
        ConstraintBuilder::new(self, ImpactType::Reward, weight, magnitude)
    }
}

impl<S, A, K, E, FU, KF, C, GF, M, Sc>
    ConstraintBuilder<GroupedConstraintStream<S, A, K, E, FU, KF, C, GF, Sc>, M, Sc>
where
    S: Send + Sync,
    A: Clone + Send + Sync + 'static,
    K: Clone + Eq + Hash + Send + Sync,
    E: Fn(&S) -> &[A] + Send + Sync,
    FU: UniFilter<S, A>,
    KF: Fn(&A) -> K + Send + Sync,
    C: UniCollector<A>,
    GF: BiFilter<S, K, C::Result>,
    M: Fn(&S, &K, &C::Result) -> i64 + Send + Sync,
    Sc: Score,
{
    /// Finalizes into a [`GroupedUniConstraint`].
    pub fn as_constraint(
        self,
        name: &str,
    ) -> GroupedUniConstraint<S, A, K, E, FU, KF, C, GF, M, Sc> {
        let constraint_ref = self.constraint_ref(name);
        let is_hard = self.is_hard();
        let stream = self.stream;
        GroupedUniConstraint::new(
            constraint_ref,
            self.impact_type,
            stream.descriptor_index,
            stream.extractor,
            stream.pre_filter,
            stream.key_fn,
            stream.collector,
            stream.group_filter,
            self.magnitude,
            self.weight,
            is_hard,
        )
    }
}

impl<S, A, K, E, FU, KF, C, GF, Sc: Score> std::fmt::Debug
    for GroupedConstraintStream<S, A, K, E, FU, KF, C, GF, Sc>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupedConstraintStream")
            .field("descriptor_index", &self.descriptor_index)
            .finish()
    }
}
