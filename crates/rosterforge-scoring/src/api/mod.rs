//! Zero-erasure constraint API.
//!
//! This module provides:
//! - `ConstraintSet` trait for tuple-based constraint evaluation
//! - `IncrementalConstraint` trait for incremental scoring
//! - Analysis types for score explanation and indictments

pub mod analysis;
pub mod constraint_set;

#[cfg(test)]
mod analysis_tests;

pub use analysis::{
    ConstraintAnalysis, ConstraintJustification, DetailedConstraintMatch, EntityRef, Indictment,
    IndictmentMap, ScoreExplanation,
};
pub use constraint_set::{ConstraintResult, ConstraintSet, IncrementalConstraint};
