// Typed constraint set for zero-erasure incremental scoring.
//
// `ConstraintSet` enables fully monomorphized constraint evaluation
// without virtual dispatch: a roster's catalogue is a tuple of concrete
// constraint types.

use rosterforge_core::score::Score;
use rosterforge_core::ConstraintRef;

use super::super::analysis::{ConstraintAnalysis, DetailedConstraintMatch};

/// A single constraint with incremental scoring capability.
///
/// # Incremental Protocol
///
/// 1. Call `initialize` once to populate internal state
/// 2. Before a fact changes: call `on_retract` with its old state
/// 3. After the change: call `on_insert` with its new state
///
/// The sum of returned deltas always equals the change in `evaluate`.
/// Each call carries the descriptor index of the fact collection being
/// touched; constraints ignore descriptors they do not read.
pub trait IncrementalConstraint<S, Sc: Score>: Send + Sync {
    /// Full evaluation of this constraint from scratch.
    fn evaluate(&self, solution: &S) -> Sc;

    /// Returns the number of matches for this constraint.
    fn match_count(&self, solution: &S) -> usize;

    /// Initializes internal state by inserting all facts.
    ///
    /// Returns the total score from initialization.
    fn initialize(&mut self, solution: &S) -> Sc;

    /// Called after a fact is inserted or changed. Returns the score delta.
    fn on_insert(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    /// Called before a fact is removed or changed. Returns the score delta.
    fn on_retract(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    /// Clears internal state.
    fn reset(&mut self);

    /// Returns the constraint name.
    fn name(&self) -> &str;

    /// Returns true if this is a hard constraint.
    fn is_hard(&self) -> bool {
        false
    }

    /// Returns the constraint reference (package + name).
    fn constraint_ref(&self) -> ConstraintRef {
        ConstraintRef::new("", self.name())
    }

    /// Returns detailed matches with fact justifications.
    fn get_matches(&self, _solution: &S) -> Vec<DetailedConstraintMatch<Sc>> {
        Vec::new()
    }

    /// Returns the configured weight (score per unit of match magnitude).
    fn weight(&self) -> Sc {
        Sc::zero()
    }
}

/// Result of evaluating a single constraint.
#[derive(Debug, Clone)]
pub struct ConstraintResult<Sc> {
    /// Constraint name.
    pub name: String,
    /// Score contribution from this constraint.
    pub score: Sc,
    /// Number of matches for this constraint.
    pub match_count: usize,
    /// Whether this is a hard constraint.
    pub is_hard: bool,
}

/// A set of constraints that can be evaluated together.
///
/// Implemented for tuples of `IncrementalConstraint` up to 16 elements.
pub trait ConstraintSet<S, Sc: Score>: Send + Sync {
    /// Evaluates all constraints and returns the total score.
    fn evaluate_all(&self, solution: &S) -> Sc;

    /// Returns the number of constraints in this set.
    fn constraint_count(&self) -> usize;

    /// Evaluates each constraint individually, in set order.
    fn evaluate_each(&self, solution: &S) -> Vec<ConstraintResult<Sc>>;

    /// Evaluates each constraint with detailed match information.
    fn evaluate_detailed(&self, solution: &S) -> Vec<ConstraintAnalysis<Sc>>;

    /// Initializes all constraints. Returns the total score.
    fn initialize_all(&mut self, solution: &S) -> Sc;

    /// Notifies every constraint of an insertion. Returns the total delta.
    fn on_insert_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    /// Notifies every constraint of a retraction. Returns the total delta.
    fn on_retract_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    /// Resets all constraints.
    fn reset_all(&mut self);
}

impl<S: Send + Sync, Sc: Score> ConstraintSet<S, Sc> for () {
    #[inline]
    fn evaluate_all(&self, _solution: &S) -> Sc {
        Sc::zero()
    }

    #[inline]
    fn constraint_count(&self) -> usize {
        0
    }

    fn evaluate_each(&self, _solution: &S) -> Vec<ConstraintResult<Sc>> {
        Vec::new()
    }

    fn evaluate_detailed(&self, _solution: &S) -> Vec<ConstraintAnalysis<Sc>> {
        Vec::new()
    }

    #[inline]
    fn initialize_all(&mut self, _solution: &S) -> Sc {
        Sc::zero()
    }

    #[inline]
    fn on_insert_all(&mut self, _solution: &S, _entity_index: usize, _descriptor_index: usize) -> Sc {
        Sc::zero()
    }

    #[inline]
    fn on_retract_all(&mut self, _solution: &S, _entity_index: usize, _descriptor_index: usize) -> Sc {
        Sc::zero()
    }

    #[inline]
    fn reset_all(&mut self) {}
}

macro_rules! impl_constraint_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<S, Sc, $($T),+> ConstraintSet<S, Sc> for ($($T,)+)
        where
            S: Send + Sync,
            Sc: Score,
            $($T: IncrementalConstraint<S, Sc>,)+
        {
            #[inline]
            fn evaluate_all(&self, solution: &S) -> Sc {
                let mut total = Sc::zero();
                $(total = total + self.$idx.evaluate(solution);)+
                total
            }

            #[inline]
            fn constraint_count(&self) -> usize {
                [$(stringify!($T)),+].len()
            }

            fn evaluate_each(&self, solution: &S) -> Vec<ConstraintResult<Sc>> {
                vec![$(ConstraintResult {
                    name: self.$idx.name().to_string(),
                    score: self.$idx.evaluate(solution),
                    match_count: self.$idx.match_count(solution),
                    is_hard: self.$idx.is_hard(),
                }),+]
            }

            fn evaluate_detailed(&self, solution: &S) -> Vec<ConstraintAnalysis<Sc>> {
                vec![$({
                    let matches = self.$idx.get_matches(solution);
                    let score = matches.iter().fold(Sc::zero(), |acc, m| acc + m.score);
                    ConstraintAnalysis::new(
                        self.$idx.constraint_ref(),
                        self.$idx.weight(),
                        score,
                        matches,
                        self.$idx.is_hard(),
                    )
                }),+]
            }

            #[inline]
            fn initialize_all(&mut self, solution: &S) -> Sc {
                let mut total = Sc::zero();
                $(total = total + self.$idx.initialize(solution);)+
                total
            }

            #[inline]
            fn on_insert_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
                let mut total = Sc::zero();
                $(total = total + self.$idx.on_insert(solution, entity_index, descriptor_index);)+
                total
            }

            #[inline]
            fn on_retract_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
                let mut total = Sc::zero();
                $(total = total + self.$idx.on_retract(solution, entity_index, descriptor_index);)+
                total
            }

            #[inline]
            fn reset_all(&mut self) {
                $(self.$idx.reset();)+
            }
        }
    };
}

impl_constraint_set_for_tuple!(0: C0);
impl_constraint_set_for_tuple!(0: C0, 1: C1);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11, 12: C12);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11, 12: C12, 13: C13);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11, 12: C12, 13: C13, 14: C14);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11, 12: C12, 13: C13, 14: C14, 15: C15);
