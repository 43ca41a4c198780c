//! Zero-erasure incremental constraint kinds.
//!
//! Each kind stores its closures as concrete generic types and owns the
//! indices it needs to answer a single insert or retract without rescanning
//! unrelated facts.
//!
//! | Kind | Matches |
//! |---|---|
//! | [`IncrementalUniConstraint`] | one fact passing a filter |
//! | [`IncrementalBiConstraint`] | two facts of one collection sharing a key |
//! | [`IncrementalCrossBiConstraint`] | a fact from each of two collections sharing a key |
//! | [`GroupedUniConstraint`] | a group of facts reduced by a collector |

pub mod bi_incremental;
pub mod cross_bi_incremental;
pub mod grouped;
pub mod incremental;
pub mod shared;


pub use bi_incremental::{IncrementalBiConstraint, PairMode};
pub use cross_bi_incremental::IncrementalCrossBiConstraint;
pub use grouped::GroupedUniConstraint;
pub use incremental::IncrementalUniConstraint;
