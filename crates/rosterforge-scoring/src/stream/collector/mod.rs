//! Collectors reduce the facts of one group to a single result.
//!
//! A collector extracts a value from each fact once; the accumulator only
//! ever sees extracted values. That lets a grouped constraint remember the
//! value it accumulated and retract exactly that value later, even after the
//! fact itself changed.

mod count;
mod sum;

pub use count::{count, CountAccumulator, CountCollector};
pub use sum::{sum, SumAccumulator, SumCollector};

/// Extracts per-fact values and creates accumulators for them.
pub trait UniCollector<A>: Send + Sync {
    /// Value extracted from one fact.
    type Value: Send + Sync;
    /// Result of a whole group.
    type Result: Send + Sync;
    /// Running state of one group.
    type Accumulator: Accumulator<Self::Value, Self::Result>;

    /// Extracts the value a fact contributes.
    fn extract(&self, entity: &A) -> Self::Value;

    /// Creates an empty accumulator.
    fn create_accumulator(&self) -> Self::Accumulator;
}

/// Incrementally maintained group state.
pub trait Accumulator<V, R>: Send + Sync {
    /// Adds a value.
    fn accumulate(&mut self, value: &V);

    /// Removes a previously accumulated value.
    fn retract(&mut self, value: &V);

    /// Returns the current result.
    fn finish(&self) -> R;

    /// Clears the accumulator.
    fn reset(&mut self);
}
