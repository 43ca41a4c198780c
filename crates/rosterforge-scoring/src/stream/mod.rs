//! Fluent constraint stream API for zero-erasure constraint programming.
//!
//! Streams are builders: each step wraps the previous one in a new generic
//! type, and `as_constraint` produces a fully monomorphized incremental
//! constraint. Nothing is boxed.
//!
//! # Example
//!
//! ```
//! use rosterforge_core::HardMediumSoftScore;
//! use rosterforge_scoring::api::constraint_set::{ConstraintSet, IncrementalConstraint};
//! use rosterforge_scoring::stream::joiner::{equal, overlapping};
//! use rosterforge_scoring::constraint::PairMode;
//! use rosterforge_scoring::stream::ConstraintFactory;
//!
//! #[derive(Clone, Debug)]
//! struct Shift {
//!     id: usize,
//!     employee: Option<usize>,
//!     start: i64,
//!     end: i64,
//! }
//!
//! struct Roster {
//!     shifts: Vec<Shift>,
//! }
//!
//! fn shifts(r: &Roster) -> &[Shift] {
//!     r.shifts.as_slice()
//! }
//!
//! let factory = ConstraintFactory::<Roster, HardMediumSoftScore>::new();
//! let unassigned = factory
//!     .for_each(0, shifts)
//!     .filter(|s: &Shift| s.employee.is_none())
//!     .penalize(HardMediumSoftScore::ONE_MEDIUM)
//!     .as_constraint("Assign every shift");
//! let overlap = factory
//!     .for_each(0, shifts)
//!     .filter(|s: &Shift| s.employee.is_some())
//!     .join_self(equal(|s: &Shift| s.employee), PairMode::Unique)
//!     .and_join(overlapping(
//!         |a: &Shift| a.start,
//!         |a: &Shift| a.end,
//!         |b: &Shift| b.start,
//!         |b: &Shift| b.end,
//!     ))
//!     .penalize_with(HardMediumSoftScore::ONE_HARD, |a: &Shift, b: &Shift| {
//!         if a.id > b.id { a.end - a.start } else { b.end - b.start }
//!     })
//!     .as_constraint("No overlapping shifts");
//!
//! let constraints = (unassigned, overlap);
//! let roster = Roster {
//!     shifts: vec![
//!         Shift { id: 0, employee: Some(0), start: 0, end: 8 },
//!         Shift { id: 1, employee: Some(0), start: 4, end: 10 },
//!         Shift { id: 2, employee: None, start: 0, end: 8 },
//!     ],
//! };
//! assert_eq!(constraints.evaluate_all(&roster), HardMediumSoftScore::of(-6, -1, 0));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ConstraintFactory::new()
//!     .for_each(descriptor, extractor)  -> UniConstraintStream
//!     .filter(predicate)                -> UniConstraintStream (filters accumulate)
//!     .join_self(equal(key), mode)      -> BiConstraintStream
//!     .join(descriptor, extractor, key) -> CrossBiConstraintStream
//!     .group_by(key, collector)         -> GroupedConstraintStream
//!     .penalize(weight)                 -> ConstraintBuilder
//!     .as_constraint(name)              -> Incremental*Constraint / GroupedUniConstraint
//! ```

mod bi_stream;
mod builder;
pub mod collector;
mod cross_bi_stream;
mod factory;
pub mod filter;
mod grouped_stream;
pub mod joiner;
mod uni_stream;

#[cfg(test)]
mod tests;

pub use bi_stream::BiConstraintStream;
pub use builder::ConstraintBuilder;
pub use cross_bi_stream::CrossBiConstraintStream;
pub use factory::ConstraintFactory;
pub use grouped_stream::GroupedConstraintStream;
pub use uni_stream::UniConstraintStream;
