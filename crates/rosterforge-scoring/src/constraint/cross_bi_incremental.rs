//! Incremental cross-bi-constraint: joins two fact collections on a key.
//!
//! Both sides are indexed by key and both accept inserts and retracts, so a
//! change to either collection only visits the facts sharing its key.

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

/// Per-side index state.
struct SideIndex<K> {
    by_key: HashMap<K, HashSet<usize>>,
    key_of: HashMap<usize, K>,
    /// index -> matched (a, b) pairs it takes part in
    matches_of: HashMap<usize, PairList>,
}

impl<K: Eq + Hash + Clone> SideIndex<K> {
    fn new() -> Self {
        Self {
            by_key: HashMap::new(),
            key_of: HashMap::new(),
            matches_of: HashMap::new(),
        }
    }

    fn clear(&mut self) {
        self.by_key.clear();
        self.key_of.clear();
        self.matches_of.clear();
    }

    fn contains(&self, index: usize) -> bool {
        self.key_of.contains_key(&index)
    }

    fn add(&mut self, index: usize, key: K) {
        self.by_key.entry(key.clone()).or_default().insert(index);
        self.key_of.insert(index, key);
    }

    fn remove(&mut self, index: usize) -> Option<PairList> {
        if let Some(key) = self.key_of.remove(&index) {
            if let Some(set) = self.by_key.get_mut(&key) {
                set.remove(&index);
                if set.is_empty() {
                    self.by_key.remove(&key);
                }
            }
        }
        self.matches_of.remove(&index)
    }

    fn peers(&self, key: &K) -> Vec<usize> {
        self.by_key
            .get(key)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn link(&mut self, index: usize, pair: (usize, usize)) {
        self.matches_of.entry(index).or_default().push(pair);
    }

    fn unlink(&mut self, index: usize, pair: (usize, usize)) {
        if let Some(list) = self.matches_of.get_mut(&index) {
            remove_pair(list, pair);
            if list.is_empty() {
                self.matches_of.remove(&index);
            }
        }
    }
}

/// Zero-erasure incremental constraint over pairs `(a, b)` drawn from two
/// collections, joined on `key_a(a) == key_b(b)` and filtered per pair.
pub struct IncrementalCrossBiConstraint<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc>
where
    Sc: Score,
{
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    descriptor_a: usize,
    descriptor_b: usize,
    extractor_a: EA,
    extractor_b: EB,
    key_a: KA,
    key_b: KB,
    filter_a: FA,
    filter_b: FB,
    filter: F,
    magnitude: M,
    weight: Sc,
    is_hard: bool,
    side_a: SideIndex<K>,
    side_b: SideIndex<K>,
    /// matched (a index, b index) -> stored contribution
    matches: HashMap<(usize, usize), Sc>,
    _phantom: PhantomData<fn(&S) -> (A, B)>,
}

impl<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc>
    IncrementalCrossBiConstraint<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc>
where
    K: Eq + Hash + Clone,
    EA: Fn(&S) -> &[A],
    EB: Fn(&S) -> &[B],
    KA: Fn(&A) -> K,
    KB: Fn(&B) -> K,
    FA: UniFilter<S, A>,
    FB: UniFilter<S, B>,
    F: BiFilter<S, A, B>,
    M: Fn(&A, &B) -> i64,
    Sc: Score,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        descriptors: (usize, usize),
        extractors: (EA, EB),
        keys: (KA, KB),
        side_filters: (FA, FB),
        filter: F,
        magnitude: M,
        weight: Sc,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            descriptor_a: descriptors.0,
            descriptor_b: descriptors.1,
            extractor_a: extractors.0,
            extractor_b: extractors.1,
            key_a: keys.0,
            key_b: keys.1,
            filter_a: side_filters.0,
            filter_b: side_filters.1,
            filter,
            magnitude,
            weight,
            is_hard,
            side_a: SideIndex::new(),
            side_b: SideIndex::new(),
            matches: HashMap::new(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    fn is_disabled(&self) -> bool {
        self.weight.is_zero()
    }

    #[inline]
    fn pair_score(&self, solution: &S, a: &A, b: &B) -> Option<Sc> {
        if self.filter.test(solution, a, b) {
            Some(impact(self.weight, self.impact_type, (self.magnitude)(a, b)))
        } else {
            None
        }
    }

    /// Visits every matching pair of a snapshot from scratch, ordered by (a, b).
    fn for_each_match(&self, solution: &S, mut visit: impl FnMut(usize, usize, Sc)) {
        let a_facts = (self.extractor_a)(solution);
        let b_facts = (self.extractor_b)(solution);

        let mut b_by_key: HashMap<K, Vec<usize>> = HashMap::new();
        for (j, b) in b_facts.iter().enumerate() {
            if self.filter_b.test(solution, b) {
                b_by_key.entry((self.key_b)(b)).or_default().push(j);
            }
        }

        for (i, a) in a_facts.iter().enumerate() {
            if !self.filter_a.test(solution, a) {
                continue;
            }
            let Some(bs) = b_by_key.get(&(self.key_a)(a)) else {
                continue;
            };
            for &j in bs {
                if let Some(score) = self.pair_score(solution, a, &b_facts[j]) {
                    visit(i, j, score);
                }
            }
        }
    }

    fn record(&mut self, pair: (usize, usize), score: Sc) {
        self.matches.insert(pair, score);
        self.side_a.link(pair.0, pair);
        self.side_b.link(pair.1, pair);
    }

    fn insert_a(&mut self, solution: &S, index: usize) -> Sc {
        let mut total = Sc::zero();
        if self.side_a.contains(index) {
            total = self.retract_a(index);
        }
        let a_facts = (self.extractor_a)(solution);
        let b_facts = (self.extractor_b)(solution);
        let Some(a) = a_facts.get(index) else {
            return total;
        };
        if !self.filter_a.test(solution, a) {
            return total;
        }
        let key = (self.key_a)(a);
        let peers = self.side_b.peers(&key);
        self.side_a.add(index, key);

        for j in peers {
            let Some(b) = b_facts.get(j) else { continue };
            if let Some(score) = self.pair_score(solution, a, b) {
                self.record((index, j), score);
                total = total + score;
            }
        }
        total
    }

    fn insert_b(&mut self, solution: &S, index: usize) -> Sc {
        let mut total = Sc::zero();
        if self.side_b.contains(index) {
            total = self.retract_b(index);
        }
        let a_facts = (self.extractor_a)(solution);
        let b_facts = (self.extractor_b)(solution);
        let Some(b) = b_facts.get(index) else {
            return total;
        };
        if !self.filter_b.test(solution, b) {
            return total;
        }
        let key = (self.key_b)(b);
        let peers = self.side_a.peers(&key);
        self.side_b.add(index, key);

        for i in peers {
            let Some(a) = a_facts.get(i) else { continue };
            if let Some(score) = self.pair_score(solution, a, b) {
                self.record((i, index), score);
                total = total + score;
            }
        }
        total
    }

    fn retract_a(&mut self, index: usize) -> Sc {
        let mut total = Sc::zero();
        for pair in self.side_a.remove(index).unwrap_or_default() {
            self.side_b.unlink(pair.1, pair);
            if let Some(score) = self.matches.remove(&pair) {
                total = total - score;
            }
        }
        total
    }

    fn retract_b(&mut self, index: usize) -> Sc {
        let mut total = Sc::zero();
        for pair in self.side_b.remove(index).unwrap_or_default() {
            self.side_a.unlink(pair.0, pair);
            if let Some(score) = self.matches.remove(&pair) {
                total = total - score;
            }
        }
        total
    }
}

impl<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc> IncrementalConstraint<S, Sc>
    for IncrementalCrossBiConstraint<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc>
where
    S: Send + Sync,
    A: Clone + Debug + Send + Sync + 'static,
    B: Clone + Debug + Send + Sync + 'static,
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
        let b_len = (self.extractor_b)(solution).len();
        for j in 0..b_len {
            // No A facts are indexed yet, so this only builds the B index.
            self.insert_b(solution, j);
        }
        let a_len = (self.extractor_a)(solution).len();
        let mut total = Sc::zero();
        for i in 0..a_len {
            total = total + self.insert_a(solution, i);
        }
        total
    }

    fn on_insert(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        if self.is_disabled() {
            return Sc::zero();
        }
        let mut total = Sc::zero();
        if descriptor_index == self.descriptor_a {
            total = total + self.insert_a(solution, entity_index);
        }
        if descriptor_index == self.descriptor_b {
            total = total + self.insert_b(solution, entity_index);
        }
        total
    }

    fn on_retract(&mut self, _solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        let mut total = Sc::zero();
        if descriptor_index == self.descriptor_a {
            total = total + self.retract_a(entity_index);
        }
        if descriptor_index == self.descriptor_b {
            total = total + self.retract_b(entity_index);
        }
        total
    }

    fn reset(&mut self) {
        self.side_a.clear();
        self.side_b.clear();
        self.matches.clear();
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
        let a_facts = (self.extractor_a)(solution);
        let b_facts = (self.extractor_b)(solution);
        let mut result = Vec::new();
        self.for_each_match(solution, |i, j, score| {
            let justification = ConstraintJustification::new(vec![
                EntityRef::new(&a_facts[i]),
                EntityRef::new(&b_facts[j]),
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

impl<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc: Score> Debug
    for IncrementalCrossBiConstraint<S, A, B, K, EA, EB, KA, KB, FA, FB, F, M, Sc>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalCrossBiConstraint")
            .field("name", &self.constraint_ref.name)
            .field("impact_type", &self.impact_type)
            .field("match_count", &self.matches.len())
            .finish()
    }
}
