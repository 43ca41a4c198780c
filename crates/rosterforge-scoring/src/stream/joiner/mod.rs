//! Joiners: matching conditions between two facts.
//!
//! A join needs at least one equality joiner so the engine can index facts
//! by key; every further joiner is checked per candidate pair.
//!
//! ```
//! use rosterforge_scoring::stream::joiner::{equal, less_than, Joiner};
//!
//! struct Shift { employee: Option<usize>, start: i64, end: i64 }
//!
//! let same_employee = equal(|s: &Shift| s.employee);
//! let before = less_than(|s: &Shift| s.end, |s: &Shift| s.start);
//! let joiner = same_employee.and(before);
//!
//! let morning = Shift { employee: Some(1), start: 6, end: 14 };
//! let night = Shift { employee: Some(1), start: 22, end: 30 };
//! assert!(joiner.matches(&morning, &night));
//! assert!(!joiner.matches(&night, &morning));
//! ```

mod comparison;
mod equal;
mod filtering;
mod overlapping;

pub use comparison::{
    greater_than, greater_than_or_equal, less_than, less_than_or_equal, GreaterThanJoiner,
    GreaterThanOrEqualJoiner, LessThanJoiner, LessThanOrEqualJoiner,
};
pub use equal::{equal, equal_bi, EqualJoiner};
pub use filtering::{filtering, FilteringJoiner};
pub use overlapping::{overlapping, OverlappingJoiner};

/// A matching condition between a left fact `A` and a right fact `B`.
pub trait Joiner<A, B>: Send + Sync {
    /// Returns true if the two facts should be joined.
    fn matches(&self, a: &A, b: &B) -> bool;

    /// Combines this joiner with another; both must match.
    fn and<J>(self, other: J) -> AndJoiner<Self, J>
    where
        Self: Sized,
        J: Joiner<A, B>,
    {
        AndJoiner {
            first: self,
            second: other,
        }
    }
}

/// Conjunction of two joiners, created by [`Joiner::and`].
pub struct AndJoiner<J1, J2> {
    first: J1,
    second: J2,
}

impl<A, B, J1, J2> Joiner<A, B> for AndJoiner<J1, J2>
where
    J1: Joiner<A, B>,
    J2: Joiner<A, B>,
{
    #[inline]
    fn matches(&self, a: &A, b: &B) -> bool {
        self.first.matches(a, b) && self.second.matches(a, b)
    }
}

#[cfg(test)]
mod tests;
