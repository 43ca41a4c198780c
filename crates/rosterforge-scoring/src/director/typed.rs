//! Typed score director for zero-erasure incremental scoring.
//!
//! This module provides `TypedScoreDirector`, which keeps a monomorphized
//! constraint set in sync with a working solution.

use std::marker::PhantomData;

use rosterforge_config::EnvironmentMode;
use rosterforge_core::domain::PlanningSolution;
use rosterforge_core::score::Score;
use rosterforge_core::{Result, RosterForgeError};
use tracing::{debug, error, trace};

use crate::api::analysis::ScoreExplanation;
use crate::api::constraint_set::{ConstraintResult, ConstraintSet};

/// A typed score director for zero-erasure incremental scoring.
///
/// The director owns the working solution and a tuple of typed constraints.
/// Callers report each change to one fact through
/// [`before_variable_changed`](Self::before_variable_changed) and
/// [`after_variable_changed`](Self::after_variable_changed) (or
/// [`do_change`](Self::do_change)); only the matches touching that fact are
/// recomputed.
///
/// # Type Parameters
///
/// - `S`: The solution type (must implement `PlanningSolution`)
/// - `C`: The constraint set type (tuple of typed constraints)
///
/// # Example
///
/// ```
/// use rosterforge_core::domain::PlanningSolution;
/// use rosterforge_core::score::SimpleScore;
/// use rosterforge_scoring::director::typed::TypedScoreDirector;
/// use rosterforge_scoring::stream::ConstraintFactory;
///
/// #[derive(Clone)]
/// struct Slots {
///     values: Vec<Option<i32>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Slots {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let unassigned = ConstraintFactory::<Slots, SimpleScore>::new()
///     .for_each(0, |s: &Slots| s.values.as_slice())
///     .filter(|v: &Option<i32>| v.is_none())
///     .penalize(SimpleScore::of(1))
///     .as_constraint("Unassigned");
///
/// let solution = Slots { values: vec![Some(1), None, Some(2)], score: None };
/// let mut director = TypedScoreDirector::new(solution, (unassigned,));
///
/// assert_eq!(director.calculate_score().unwrap(), SimpleScore::of(-1));
///
/// let score = director.do_change(0, 1, |s| s.values[1] = Some(3)).unwrap();
/// assert_eq!(score, SimpleScore::of(0));
/// ```
pub struct TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    C: ConstraintSet<S, S::Score>,
{
    working_solution: S,
    constraints: C,
    cached_score: S::Score,
    initialized: bool,
    environment_mode: EnvironmentMode,
    _phantom: PhantomData<S::Score>,
}

impl<S, C> TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    S::Score: Score,
    C: ConstraintSet<S, S::Score>,
{
    /// Creates a director in the default environment mode.
    pub fn new(solution: S, constraints: C) -> Self {
        Self::with_environment_mode(solution, constraints, EnvironmentMode::default())
    }

    /// Creates a director that runs the consistency checks of `environment_mode`.
    pub fn with_environment_mode(
        solution: S,
        constraints: C,
        environment_mode: EnvironmentMode,
    ) -> Self {
        Self {
            working_solution: solution,
            constraints,
            cached_score: S::Score::zero(),
            initialized: false,
            environment_mode,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the working solution.
    pub fn working_solution(&self) -> &S {
        &self.working_solution
    }

    /// Returns a mutable reference to the working solution.
    ///
    /// Changes made through this reference must be bracketed by
    /// `before_variable_changed`/`after_variable_changed` or followed by
    /// `insert_fact`/`retract_fact`, otherwise the cached score goes stale.
    pub fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    /// Returns the environment mode.
    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    /// Calculates and returns the current score.
    ///
    /// On first call, initializes all constraints. Subsequent calls return
    /// the cached score, verified against a full recalculation in
    /// `FastAssert` and `FullAssert` modes.
    pub fn calculate_score(&mut self) -> Result<S::Score> {
        if !self.initialized {
            self.cached_score = self.constraints.initialize_all(&self.working_solution);
            self.initialized = true;
            debug!(
                event = "score_initialized",
                score = %self.cached_score,
                constraint_count = self.constraints.constraint_count(),
            );
        } else if self.asserts_on_calculate() {
            self.assert_score_consistency()?;
        }
        self.working_solution.set_score(Some(self.cached_score));
        Ok(self.cached_score)
    }

    /// Retracts one fact from all constraints before it changes.
    ///
    /// Does nothing until the score is initialized; the first
    /// `calculate_score` sees the changed fact anyway.
    #[inline]
    pub fn before_variable_changed(&mut self, descriptor_index: usize, entity_index: usize) {
        if !self.initialized {
            return;
        }
        let delta =
            self.constraints
                .on_retract_all(&self.working_solution, entity_index, descriptor_index);
        self.cached_score = self.cached_score + delta;
    }

    /// Re-inserts one fact into all constraints after it changed.
    #[inline]
    pub fn after_variable_changed(&mut self, descriptor_index: usize, entity_index: usize) {
        if !self.initialized {
            return;
        }
        let delta =
            self.constraints
                .on_insert_all(&self.working_solution, entity_index, descriptor_index);
        self.cached_score = self.cached_score + delta;
    }

    /// Runs a complete change cycle for one fact and returns the new score.
    ///
    /// Equivalent to:
    /// 1. `before_variable_changed(descriptor_index, entity_index)`
    /// 2. Apply the change via `change_fn`
    /// 3. `after_variable_changed(descriptor_index, entity_index)`
    pub fn do_change<F>(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        change_fn: F,
    ) -> Result<S::Score>
    where
        F: FnOnce(&mut S),
    {
        self.before_variable_changed(descriptor_index, entity_index);
        change_fn(&mut self.working_solution);
        self.after_variable_changed(descriptor_index, entity_index);
        trace!(
            event = "fact_changed",
            descriptor_index,
            entity_index,
            score = %self.cached_score,
        );
        self.after_change()
    }

    /// Adds the contributions of a fact that now exists at `entity_index`.
    pub fn insert_fact(&mut self, descriptor_index: usize, entity_index: usize) -> Result<S::Score> {
        self.after_variable_changed(descriptor_index, entity_index);
        trace!(event = "fact_inserted", descriptor_index, entity_index);
        self.after_change()
    }

    /// Removes the contributions of the fact at `entity_index`.
    ///
    /// Call this while the fact is still in place; contributions are
    /// retracted from stored values so the fact may be gone afterwards.
    pub fn retract_fact(&mut self, descriptor_index: usize, entity_index: usize) -> Result<S::Score> {
        self.before_variable_changed(descriptor_index, entity_index);
        trace!(event = "fact_retracted", descriptor_index, entity_index);
        Ok(self.cached_score)
    }

    /// Returns the cached score without recalculation.
    ///
    /// Returns zero score if not yet initialized.
    #[inline]
    pub fn get_score(&self) -> S::Score {
        self.cached_score
    }

    /// Resets the director state.
    ///
    /// Call this after changes that bypassed the change protocol.
    pub fn reset(&mut self) {
        self.constraints.reset_all();
        self.initialized = false;
        self.cached_score = S::Score::zero();
        debug!(event = "score_reset");
    }

    /// Re-scores the working solution from scratch and compares it with the
    /// incrementally maintained score.
    pub fn assert_score_consistency(&self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        let expected = self.constraints.evaluate_all(&self.working_solution);
        if expected != self.cached_score {
            error!(
                event = "score_corruption",
                expected = %expected,
                actual = %self.cached_score,
            );
            return Err(RosterForgeError::ScoreCorruption {
                expected: expected.to_string(),
                actual: self.cached_score.to_string(),
            });
        }
        Ok(())
    }

    /// Explains the working solution from a batch evaluation.
    pub fn explain(&self) -> ScoreExplanation<S::Score> {
        let constraint_analyses = self.constraints.evaluate_detailed(&self.working_solution);
        let score = constraint_analyses
            .iter()
            .fold(S::Score::zero(), |total, analysis| total + analysis.score);
        ScoreExplanation::new(score, constraint_analyses)
    }

    /// Returns per-constraint totals from a batch evaluation.
    pub fn constraint_results(&self) -> Vec<ConstraintResult<S::Score>> {
        self.constraints.evaluate_each(&self.working_solution)
    }

    /// Returns a reference to the constraint set.
    pub fn constraints(&self) -> &C {
        &self.constraints
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.constraint_count()
    }

    /// Returns whether the director is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Consumes the director and returns the working solution with its
    /// last calculated score set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rosterforge_scoring::director::typed::TypedScoreDirector;
    /// use rosterforge_core::domain::PlanningSolution;
    /// use rosterforge_core::score::SimpleScore;
    ///
    /// #[derive(Clone)]
    /// struct Slots {
    ///     values: Vec<i32>,
    ///     score: Option<SimpleScore>,
    /// }
    ///
    /// impl PlanningSolution for Slots {
    ///     type Score = SimpleScore;
    ///     fn score(&self) -> Option<Self::Score> { self.score }
    ///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
    /// }
    ///
    /// let mut director = TypedScoreDirector::new(Slots { values: vec![1, 2, 3], score: None }, ());
    /// director.calculate_score().unwrap();
    /// let result = director.take_solution();
    /// assert_eq!(result.values, vec![1, 2, 3]);
    /// assert_eq!(result.score, Some(SimpleScore::of(0)));
    /// ```
    pub fn take_solution(mut self) -> S {
        if self.initialized {
            self.working_solution.set_score(Some(self.cached_score));
        }
        self.working_solution
    }

    fn asserts_on_calculate(&self) -> bool {
        matches!(
            self.environment_mode,
            EnvironmentMode::FastAssert | EnvironmentMode::FullAssert
        )
    }

    fn after_change(&self) -> Result<S::Score> {
        if self.environment_mode == EnvironmentMode::FullAssert {
            self.assert_score_consistency()?;
        }
        Ok(self.cached_score)
    }
}

impl<S, C> std::fmt::Debug for TypedScoreDirector<S, C>
where
    S: PlanningSolution,
    C: ConstraintSet<S, S::Score>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedScoreDirector")
            .field("initialized", &self.initialized)
            .field("cached_score", &self.cached_score)
            .field("environment_mode", &self.environment_mode)
            .field("constraint_count", &self.constraints.constraint_count())
            .finish()
    }
}
