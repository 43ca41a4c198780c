//! RosterForge Core - Score and constraint types for roster scoring
//!
//! This crate provides the fundamental abstractions shared by every
//! RosterForge crate:
//! - Score types for representing roster quality
//! - The `PlanningSolution` trait implemented by scored snapshots
//! - Constraint identity and impact types
//! - The crate-wide error type

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::PlanningSolution;
pub use error::{Result, RosterForgeError};
pub use score::{HardMediumSoftScore, Score, ScoreParseError, SimpleScore};
