//! Incremental bi-constraint for self-join evaluation.
//!
//! Facts are indexed by their join key, so inserting or retracting one fact
//! only visits the facts sharing its key.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::{ConstraintRef, ImpactType};

use crate::api::analysis::{ConstraintJustification, DetailedConstraintMatch, EntityRef};
use crate::api::constraint_set::IncrementalConstraint;
use crate::stream::filter::{BiFilter, UniFilter};

use super::shared::{impact, remove_pair, PairList};

/// How a self-join enumerates pairs of distinct facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairMode {
    /// Each unordered pair is considered once, presented in index order.
    Unique,
    /// `(a, b)` and `(b, a)` are separate candidates.
    Ordered,
}

/// Zero-erasure incremental bi-constraint for self-joins.
///
/// A fact must pass `pre_filter` to be indexed at all; candidate pairs
/// share a key and must pass `filter`. A fact never pairs with itself.
pub struct IncrementalBiConstraint<S, A, K, E, KE, FU, FB, M, Sc>
where
    Sc: Score,
{
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    descriptor_index: usize,
    mode: PairMode,
    extractor: E,
    key_extractor: KE,
    pre_filter: FU,
    filter: FB,
    magnitude: M,
    weight: Sc,
    is_hard: bool,
    /// key -> indices of indexed facts with that key
    key_to_indices: HashMap<K, HashSet<usize>>,
    /// index -> key it was indexed under
    index_to_key: HashMap<usize, K>,
    /// matched pair -> stored contribution
    matches: HashMap<(usize, usize), Sc>,
    /// index -> matched pairs it takes part in
    entity_to_matches: HashMap<usize, PairList>,
    _phantom: PhantomData<fn(&S) -> A>,
}

impl<S, A, K, E, KE, FU, FB, M, Sc> IncrementalBiConstraint<S, A, K, E, KE, FU, FB, M, Sc>
where
    K: Eq + Hash + Clone,
    E: Fn(&S) -> &[A],
    KE: Fn(&A) -> K,
    FU: UniFilter<S, A>,
    FB: BiFilter<S, A, A>,
    M: Fn(&A, &A) -> i64,
    Sc: Score,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        descriptor_index: usize,
        mode: PairMode,
        extractor: E,
        key_extractor: KE,
        pre_filter: FU,
        filter: FB,
        magnitude: M,
        weight: Sc,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            descriptor_index,
            mode,
            extractor,
            key_extractor,
            pre_filter,
            filter,
            magnitude,
            weight,
            is_hard,
            key_to_indices: HashMap::new(),
            index_to_key: HashMap::new(),
            matches: HashMap::new(),
            entity_to_matches: HashMap::new(),
            _phantom: PhantomData,
        }
    }

    /// Returns the pair mode.
    pub fn mode(&self) -> PairMode {
        self.mode
    }

    #[inline]
    fn is_disabled(&self) -> bool {
        self.weight.is_zero()
    }

    #[inline]
    fn pair_score(&self, solution: &S, a: &A, b: &A) -> Option<Sc> {
        if self.filter.test(solution, a, b) {
            Some(impact(self.weight, self.impact_type, (self.magnitude)(a, b)))
        } else {
            None
        }
    }

    /// Candidate pairs between `index` and `other`, in match-key form.
    #[inline]
    fn candidates(&self, index: usize, other: usize) -> ([(usize, usize); 2], usize) {
        match self.mode {
            PairMode::Unique => ([(index.min(other), index.max(other)), (0, 0)], 1),
            PairMode::Ordered => ([(index, other), (other, index)], 2),
        }
    }

    /// Visits every matching pair of a snapshot from scratch, in index order.
    fn for_each_match(&self, solution: &S, mut visit: impl FnMut(usize, usize, Sc)) {
        let entities = (self.extractor)(solution);
        let mut buckets: HashMap<K, Vec<usize>> = HashMap::new();
        for (i, entity) in entities.iter().enumerate() {
            if self.pre_filter.test(solution, entity) {
                buckets.entry((self.key_extractor)(entity)).or_default().push(i);
            }
        }

        let mut found = Vec::new();
        for indices in buckets.values() {
            for (pos, &i) in indices.iter().enumerate() {
                for &j in &indices[pos + 1..] {
                    let (pairs, n) = self.candidates(i, j);
                    for &(x, y) in &pairs[..n] {
                        if let Some(score) = self.pair_score(solution, &entities[x], &entities[y]) {
                            found.push((x, y, score));
                        }
                    }
                }
            }
        }
        found.sort_unstable_by_key(|&(x, y, _)| (x, y));
        for (x, y, score) in found {
            visit(x, y, score);
        }
    }

    fn insert_entity(&mut self, solution: &S, index: usize) -> Sc {
        let mut total = Sc::zero();
        if self.index_to_key.contains_key(&index) {
            total = self.retract_entity(index);
        }

        let entities = (self.extractor)(solution);
        let Some(entity) = entities.get(index) else {
            return total;
        };
        if !self.pre_filter.test(solution, entity) {
            return total;
        }

        let key = (self.key_extractor)(entity);
        let bucket = self.key_to_indices.entry(key.clone()).or_default();
        let others: Vec<usize> = bucket.iter().copied().collect();
        bucket.insert(index);
        self.index_to_key.insert(index, key);

        for other in others {
            let (pairs, n) = self.candidates(index, other);
            for &(x, y) in &pairs[..n] {
                let (Some(a), Some(b)) = (entities.get(x), entities.get(y)) else {
                    continue;
                };
                if let Some(score) = self.pair_score(solution, a, b) {
                    self.matches.insert((x, y), score);
                    self.entity_to_matches.entry(x).or_default().push((x, y));
                    self.entity_to_matches.entry(y).or_default().push((x, y));
                    total = total + score;
                }
            }
        }
        total
    }

    fn retract_entity(&mut self, index: usize) -> Sc {
        if let Some(key) = self.index_to_key.remove(&index) {
            if let Some(indices) = self.key_to_indices.get_mut(&key) {
                indices.remove(&index);
                if indices.is_empty() {
                    self.key_to_indices.remove(&key);
                }
            }
        }

        let Some(pairs) = self.entity_to_matches.remove(&index) else {
            return Sc::zero();
        };

        let mut total = Sc::zero();
        for pair in pairs {
            let other = if pair.0 == index { pair.1 } else { pair.0 };
            if let Some(list) = self.entity_to_matches.get_mut(&other) {
                remove_pair(list, pair);
                if list.is_empty() {
                    self.entity_to_matches.remove(&other);
                }
            }
            if let Some(score) = self.matches.remove(&pair) {
                total = total - score;
            }
        }
        total
    }
}

impl<S, A, K, E, KE, FU, FB, M, Sc> IncrementalConstraint<S, Sc>
    for IncrementalBiConstraint<S, A, K, E, KE, FU, FB, M, Sc>
where
    S: Send + Sync,
    A: Clone + Debug + Send + Sync + 'static,
    K: Eq + Hash + Clone + Send + Sync,
    E: Fn(&S) -> &[A] + Send + Sync,
    KE: Fn(&A) -> K + Send + Sync,
    FU: UniFilter<S, A>,
    FB: BiFilter<S, A, A>,
    M: Fn(&A, &A) -> i64 + Send + Sync,
    Sc: Score,
{
    fn evaluate(&self, solution: &S) -> Sc {
        if self.is_disabled() {
            return Sc::zero();
        }
        let mut total = Sc::zero();
        self.for_each_match(solution, |_, _, score| total = total + score);
        total
    }

    fn match_count(&self, solution: &S) -> usize {
        if self.is_disabled() {
            return 0;
        }
        let mut count = 0;
        self.for_each_match(solution, |_, _, _| count += 1);
        count
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

    fn on_retract(&mut self, _solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        if descriptor_index != self.descriptor_index {
            return Sc::zero();
        }
        self.retract_entity(entity_index)
    }

    fn reset(&mut self) {
        self.key_to_indices.clear();
        self.index_to_key.clear();
        self.matches.clear();
        self.entity_to_matches.clear();
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
        let mut result = Vec::new();
        self.for_each_match(solution, |x, y, score| {
            let justification = ConstraintJustification::new(vec![
                EntityRef::new(&entities[x]),
                EntityRef::new(&entities[y]),
            ]);
            result.push(DetailedConstraintMatch::new(
                self.constraint_ref.clone(),
                score,
                justification,
            ));
        });
        result
    }

    fn weight(&self) -> Sc {
        self.weight
    }
}

impl<S, A, K, E, KE, FU, FB, M, Sc: Score> Debug
    for IncrementalBiConstraint<S, A, K, E, KE, FU, FB, M, Sc>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalBiConstraint")
            .field("name", &self.constraint_ref.name)
            .field("mode", &self.mode)
            .field("match_count", &self.matches.len())
            .finish()
    }
}
