//! Domain traits implemented by scored fact snapshots.

mod traits;

pub use traits::PlanningSolution;
