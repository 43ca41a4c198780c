//! Zero-erasure grouped constraint for group-by operations.
//!
//! Facts are partitioned by key, each group is reduced by a collector, and
//! every group that passes the group filter yields one match.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::{ConstraintRef, ImpactType};

use crate::api::analysis::{ConstraintJustification, DetailedConstraintMatch, EntityRef};
use crate::api::constraint_set::IncrementalConstraint;
use crate::stream::collector::{Accumulator, UniCollector};
use crate::stream::filter::{BiFilter, UniFilter};

use super::shared::impact;

struct GroupState<Acc, Sc> {
    acc: Acc,
    size: usize,
    /// Stored contribution; `None` while the group fails the group filter.
    score: Option<Sc>,
}

/// Constraint that groups facts by key and scores each group's collected result.
///
/// # Type Parameters
///
/// - `FU` - filter deciding which facts are grouped at all
/// - `KF` - group key function
/// - `C` - collector reducing a group
/// - `GF` - filter over `(key, result)` deciding which groups match
/// - `GM` - magnitude of a matching group
///
/// # Example
///
/// ```
/// use rosterforge_core::{ConstraintRef, ImpactType, SimpleScore};
/// use rosterforge_scoring::api::constraint_set::IncrementalConstraint;
/// use rosterforge_scoring::constraint::GroupedUniConstraint;
/// use rosterforge_scoring::stream::collector::sum;
/// use rosterforge_scoring::stream::filter::{FnBiFilter, TrueFilter};
///
/// #[derive(Clone, Debug)]
/// struct Shift { employee: usize, minutes: i64 }
///
/// struct Roster { shifts: Vec<Shift>, cap: i64 }
///
/// // Penalize every minute an employee works over the cap.
/// let constraint = GroupedUniConstraint::new(
///     ConstraintRef::new("", "Minutes over cap"),
///     ImpactType::Penalty,
///     0,
///     |r: &Roster| r.shifts.as_slice(),
///     TrueFilter,
///     |s: &Shift| s.employee,
///     sum(|s: &Shift| s.minutes),
///     FnBiFilter::new(|r: &Roster, _: &usize, total: &i64| *total > r.cap),
///     |r: &Roster, _: &usize, total: &i64| total - r.cap,
///     SimpleScore::of(1),
///     false,
/// );
///
/// let roster = Roster {
///     shifts: vec![
///         Shift { employee: 0, minutes: 300 },
///         Shift { employee: 0, minutes: 240 },
///         Shift { employee: 1, minutes: 400 },
///     ],
///     cap: 480,
/// };
/// assert_eq!(constraint.evaluate(&roster), SimpleScore::of(-60));
/// ```
pub struct GroupedUniConstraint<S, A, K, E, FU, KF, C, GF, GM, Sc>
where
    C: UniCollector<A>,
    Sc: Score,
{
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    descriptor_index: usize,
    extractor: E,
    pre_filter: FU,
    key_fn: KF,
    collector: C,
    group_filter: GF,
    magnitude: GM,
    weight: Sc,
    is_hard: bool,
    groups: HashMap<K, GroupState<C::Accumulator, Sc>>,
    /// index -> (group key, extracted value) for retraction after mutation
    entity_groups: HashMap<usize, (K, C::Value)>,
    _phantom: PhantomData<fn(&S) -> A>,
}

impl<S, A, K, E, FU, KF, C, GF, GM, Sc> GroupedUniConstraint<S, A, K, E, FU, KF, C, GF, GM, Sc>
where
    K: Clone + Eq + Hash,
    E: Fn(&S) -> &[A],
    FU: UniFilter<S, A>,
    KF: Fn(&A) -> K,
    C: UniCollector<A>,
    GF: BiFilter<S, K, C::Result>,
    GM: Fn(&S, &K, &C::Result) -> i64,
    Sc: Score,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        descriptor_index: usize,
        extractor: E,
        pre_filter: FU,
        key_fn: KF,
        collector: C,
        group_filter: GF,
        magnitude: GM,
        weight: Sc,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            descriptor_index,
            extractor,
            pre_filter,
            key_fn,
            collector,
            group_filter,
            magnitude,
            weight,
            is_hard,
            groups: HashMap::new(),
            entity_groups: HashMap::new(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    fn is_disabled(&self) -> bool {
        self.weight.is_zero()
    }

    #[inline]
    fn group_score(&self, solution: &S, key: &K, result: &C::Result) -> Option<Sc> {
        if self.group_filter.test(solution, key, result) {
            Some(impact(
                self.weight,
                self.impact_type,
                (self.magnitude)(solution, key, result),
            ))
        } else {
            None
        }
    }

    /// Recomputes a group's contribution after its accumulator changed and
    /// returns the delta. Empty groups are dropped.
    fn refresh_group(&mut self, solution: &S, key: &K) -> Sc {
        let Some(state) = self.groups.get(key) else {
            return Sc::zero();
        };
        let old = state.score.unwrap_or_else(Sc::zero);
        if state.size == 0 {
            self.groups.remove(key);
            return -old;
        }
        let new = self.group_score(solution, key, &state.acc.finish());
        if let Some(state) = self.groups.get_mut(key) {
            state.score = new;
        }
        new.unwrap_or_else(Sc::zero) - old
    }

    fn insert_entity(&mut self, solution: &S, index: usize) -> Sc {
        let mut delta = Sc::zero();
        if self.entity_groups.contains_key(&index) {
            delta = self.retract_entity(solution, index);
        }
        let entities = (self.extractor)(solution);
        let Some(entity) = entities.get(index) else {
            return delta;
        };
        if !self.pre_filter.test(solution, entity) {
            return delta;
        }

        let key = (self.key_fn)(entity);
        let value = self.collector.extract(entity);
        let collector = &self.collector;
        let state = self.groups.entry(key.clone()).or_insert_with(|| GroupState {
            acc: collector.create_accumulator(),
            size: 0,
            score: None,
        });
        state.acc.accumulate(&value);
        state.size += 1;
        self.entity_groups.insert(index, (key.clone(), value));

        delta + self.refresh_group(solution, &key)
    }

    fn retract_entity(&mut self, solution: &S, index: usize) -> Sc {
        let Some((key, value)) = self.entity_groups.remove(&index) else {
            return Sc::zero();
        };
        if let Some(state) = self.groups.get_mut(&key) {
            state.acc.retract(&value);
            state.size -= 1;
        }
        self.refresh_group(solution, &key)
    }

    /// Builds every group of a snapshot from scratch, ordered by first member.
    fn batch_groups(&self, solution: &S) -> Vec<(K, C::Accumulator, Vec<usize>)> {
        let entities = (self.extractor)(solution);
        let mut position: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, C::Accumulator, Vec<usize>)> = Vec::new();
        for (i, entity) in entities.iter().enumerate() {
            if !self.pre_filter.test(solution, entity) {
                continue;
            }
            let key = (self.key_fn)(entity);
            let slot = *position.entry(key.clone()).or_insert_with(|| {
                groups.push((key, self.collector.create_accumulator(), Vec::new()));
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.1.accumulate(&self.collector.extract(entity));
            group.2.push(i);
        }
        groups
    }
}

impl<S, A, K, E, FU, KF, C, GF, GM, Sc> IncrementalConstraint<S, Sc>
    for GroupedUniConstraint<S, A, K, E, FU, KF, C, GF, GM, Sc>
where
    S: Send + Sync,
    A: Clone + Debug + Send + Sync + 'static,
    K: Clone + Eq + Hash + Debug + Send + Sync,
    E: Fn(&S) -> &[A] + Send + Sync,
    FU: UniFilter<S, A>,
    KF: Fn(&A) -> K + Send + Sync,
    C: UniCollector<A>,
    C::Result: Debug,
    GF: BiFilter<S, K, C::Result>,
    GM: Fn(&S, &K, &C::Result) -> i64 + Send + Sync,
    Sc: Score,
{
    fn evaluate(&self, solution: &S) -> Sc {
        if self.is_disabled() {
            return Sc::zero();
        }
        self.batch_groups(solution)
            .iter()
            .filter_map(|(key, acc, _)| self.group_score(solution, key, &acc.finish()))
            .fold(Sc::zero(), |total, s| total + s)
    }

    fn match_count(&self, solution: &S) -> usize {
        if self.is_disabled() {
            return 0;
        }
        self.batch_groups(solution)
            .iter()
            .filter(|(key, acc, _)| self.group_filter.test(solution, key, &acc.finish()))
            .count()
    }

    fn initialize(&mut self, solution: &S) -> Sc {
        self.reset();
        if self.is_disabled() {
            return Sc::zero();
        }
        let len = (self.extractor)(solution).len();
        let mut total = Sc::zero();
        for i in 0..len {
            total = total + self.insert_entity(solution, i);
        }
        total
    }

    fn on_insert(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        if descriptor_index != self.descriptor_index || self.is_disabled() {
            return Sc::zero();
        }
        self.insert_entity(solution, entity_index)
    }

    fn on_retract(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        if descriptor_index != self.descriptor_index {
            return Sc::zero();
        }
        self.retract_entity(solution, entity_index)
    }

    fn reset(&mut self) {
        self.groups.clear();
        self.entity_groups.clear();
    }

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn is_hard(&self) -> bool {
        self.is_hard
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }

    fn get_matches(&self, solution: &S) -> Vec<DetailedConstraintMatch<Sc>> {
        if self.is_disabled() {
            return Vec::new();
        }
        let entities = (self.extractor)(solution);
        self.batch_groups(solution)
            .into_iter()
            .filter_map(|(key, acc, members)| {
                let result = acc.finish();
                let score = self.group_score(solution, &key, &result)?;
                let refs = members.iter().map(|&i| EntityRef::new(&entities[i])).collect();
                let description = format!("{:?} => {:?}", key, result);
                Some(DetailedConstraintMatch::new(
                    self.constraint_ref.clone(),
                    score,
                    ConstraintJustification::with_description(refs, description),
                ))
            })
            .collect()
    }

    fn weight(&self) -> Sc {
        self.weight
    }
}

impl<S, A, K, E, FU, KF, C, GF, GM, Sc> Debug
    for GroupedUniConstraint<S, A, K, E, FU, KF, C, GF, GM, Sc>
where
    C: UniCollector<A>,
    Sc: Score,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupedUniConstraint")
            .field("name", &self.constraint_ref.name)
            .field("impact_type", &self.impact_type)
            .field("group_count", &self.groups.len())
            .finish()
    }
}
