//! Zero-erasure incremental uni-constraint: one match per fact passing a filter.

use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;

use rosterforge_core::score::Score;
use rosterforge_core::{ConstraintRef, ImpactType};

use crate::api::analysis::{ConstraintJustification, DetailedConstraintMatch, EntityRef};
use crate::api::constraint_set::IncrementalConstraint;
use crate::stream::filter::UniFilter;

use super::shared::impact;

/// Incremental constraint over a single fact collection.
///
/// Each fact that passes `filter` contributes `weight * magnitude(fact)`.
/// The contribution is stored at insertion so retraction removes exactly
/// what was added.
pub struct IncrementalUniConstraint<S, A, E, F, M, Sc>
where
    Sc: Score,
{
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    descriptor_index: usize,
    extractor: E,
    filter: F,
    magnitude: M,
    weight: Sc,
    is_hard: bool,
    /// entity index -> stored contribution
    matches: HashMap<usize, Sc>,
    _phantom: PhantomData<fn(&S) -> A>,
}

impl<S, A, E, F, M, Sc> IncrementalUniConstraint<S, A, E, F, M, Sc>
where
    E: Fn(&S) -> &[A],
    F: UniFilter<S, A>,
    M: Fn(&A) -> i64,
    Sc: Score,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        descriptor_index: usize,
        extractor: E,
        filter: F,
        magnitude: M,
        weight: Sc,
        is_hard: bool,
    ) -> Self {
        Self {
            constraint_ref,
            impact_type,
            descriptor_index,
            extractor,
            filter,
            magnitude,
            weight,
            is_hard,
            matches: HashMap::new(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    fn is_disabled(&self) -> bool {
        self.weight.is_zero()
    }

    #[inline]
    fn score_of(&self, solution: &S, entity: &A) -> Option<Sc> {
        if self.filter.test(solution, entity) {
            Some(impact(self.weight, self.impact_type, (self.magnitude)(entity)))
        } else {
            None
        }
    }

    fn retract_entity(&mut self, index: usize) -> Sc {
        match self.matches.remove(&index) {
            Some(score) => -score,
            None => Sc::zero(),
        }
    }

    fn insert_entity(&mut self, solution: &S, index: usize) -> Sc {
        // Re-inserting without a retract replaces the old contribution.
        let mut delta = self.retract_entity(index);
        let entities = (self.extractor)(solution);
        let Some(entity) = entities.get(index) else {
            return delta;
        };
        if let Some(score) = self.score_of(solution, entity) {
            self.matches.insert(index, score);
            delta = delta + score;
        }
        delta
    }
}

impl<S, A, E, F, M, Sc> IncrementalConstraint<S, Sc> for IncrementalUniConstraint<S, A, E, F, M, Sc>
where
    S: Send + Sync,
    A: Clone + Debug + Send + Sync + 'static,
    E: Fn(&S) -> &[A] + Send + Sync,
    F: UniFilter<S, A>,
    M: Fn(&A) -> i64 + Send + Sync,
    Sc: Score,
{
    fn evaluate(&self, solution: &S) -> Sc {
        if self.is_disabled() {
            return Sc::zero();
        }
        (self.extractor)(solution)
            .iter()
            .filter_map(|e| self.score_of(solution, e))
            .fold(Sc::zero(), |acc, s| acc + s)
    }

    fn match_count(&self, solution: &S) -> usize {
        if self.is_disabled() {
            return 0;
        }
        (self.extractor)(solution)
            .iter()
            .filter(|e| self.filter.test(solution, e))
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

    fn on_retract(&mut self, _solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        if descriptor_index != self.descriptor_index {
            return Sc::zero();
        }
        self.retract_entity(entity_index)
    }

    fn reset(&mut self) {
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
        (self.extractor)(solution)
            .iter()
            .filter_map(|entity| {
                self.score_of(solution, entity).map(|score| {
                    DetailedConstraintMatch::new(
                        self.constraint_ref.clone(),
                        score,
                        ConstraintJustification::new(vec![EntityRef::new(entity)]),
                    )
                })
            })
            .collect()
    }

    fn weight(&self) -> Sc {
        self.weight
    }
}

impl<S, A, E, F, M, Sc: Score> Debug for IncrementalUniConstraint<S, A, E, F, M, Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalUniConstraint")
            .field("name", &self.constraint_ref.name)
            .field("impact_type", &self.impact_type)
            .field("match_count", &self.matches.len())
            .finish()
    }
}
