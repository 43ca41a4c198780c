//! Filter traits. Every filter sees the whole solution, so a predicate can
//! read configuration or facts other than the ones it is testing.

/// A predicate over a single fact.
///
/// ```
/// use rosterforge_scoring::stream::filter::UniFilter;
///
/// struct Roster { unassigned_allowed: bool }
/// struct AssignedOnly;
///
/// impl UniFilter<Roster, Option<usize>> for AssignedOnly {
///     fn test(&self, roster: &Roster, employee: &Option<usize>) -> bool {
///         roster.unassigned_allowed || employee.is_some()
///     }
/// }
///
/// let roster = Roster { unassigned_allowed: false };
/// assert!(AssignedOnly.test(&roster, &Some(3)));
/// assert!(!AssignedOnly.test(&roster, &None));
/// ```
pub trait UniFilter<S, A>: Send + Sync {
    /// Returns true if the fact passes.
    fn test(&self, solution: &S, a: &A) -> bool;
}

/// A predicate over a pair of facts, or over a group key and its result.
pub trait BiFilter<S, A, B>: Send + Sync {
    /// Returns true if the pair passes.
    fn test(&self, solution: &S, a: &A, b: &B) -> bool;
}
