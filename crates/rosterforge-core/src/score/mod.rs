//! Score types for representing roster quality
//!
//! Scores are used to compare rosters and rank candidate moves.
//! All score types are immutable `Copy` values with exact integer arithmetic.

#[macro_use]
mod macros;

mod hard_medium_soft;
mod simple;
mod traits;


pub use hard_medium_soft::HardMediumSoftScore;
pub use simple::SimpleScore;
pub use traits::{Score, ScoreParseError};
