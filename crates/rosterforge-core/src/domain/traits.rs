//! Core domain traits

use crate::score::Score;

/// A snapshot of facts that can be scored.
///
/// A planning solution holds the problem facts, the planning variables
/// the external optimizer mutates, and the last calculated score.
///
/// # Example
///
/// ```
/// use rosterforge_core::{PlanningSolution, score::SimpleScore};
///
/// #[derive(Clone)]
/// struct Slots {
///     assigned: Vec<Option<usize>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Slots {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<Self::Score> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<Self::Score>) {
///         self.score = score;
///     }
/// }
///
/// let mut slots = Slots { assigned: vec![Some(0), None], score: None };
/// slots.set_score(Some(SimpleScore::of(-1)));
/// assert_eq!(slots.score(), Some(SimpleScore::of(-1)));
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    /// The score type used to evaluate this solution.
    type Score: Score;

    /// Returns the current score of this solution, if calculated.
    ///
    /// Returns `None` if the solution has not been scored yet.
    fn score(&self) -> Option<Self::Score>;

    /// Sets the score of this solution.
    fn set_score(&mut self, score: Option<Self::Score>);
}
