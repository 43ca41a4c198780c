//! Zero-erasure incremental constraint scoring for RosterForge.
//!
//! This crate provides fully-typed incremental scoring infrastructure:
//! - Incremental constraint kinds (`IncrementalUniConstraint`,
//!   `IncrementalBiConstraint`, `IncrementalCrossBiConstraint`,
//!   `GroupedUniConstraint`)
//! - A fluent stream API that builds them (`ConstraintFactory`)
//! - Tuple-based constraint sets (zero virtual dispatch)
//! - The typed score director (`TypedScoreDirector`)
//! - Score explanation and per-fact indictments
//!
//! # Architecture
//!
//! All scoring is fully monomorphized - no `Box<dyn Trait>` in hot paths.
//! Closures are stored as generic type parameters, not `Arc<dyn Fn>`.

// Zero-erasure architecture intentionally uses complex generic types
#![allow(clippy::type_complexity)]

pub mod api;
pub mod constraint;
pub mod director;
pub mod stream;

// ============================================================================
// Incremental Constraints
// ============================================================================

pub use constraint::{
    GroupedUniConstraint, IncrementalBiConstraint, IncrementalCrossBiConstraint,
    IncrementalUniConstraint, PairMode,
};

// ============================================================================
// Constraint Set (Tuple-Based, Zero-Erasure)
// ============================================================================

pub use api::constraint_set::{ConstraintResult, ConstraintSet, IncrementalConstraint};

// ============================================================================
// Score Director
// ============================================================================

pub use director::TypedScoreDirector;

// ============================================================================
// Analysis (for score explanation)
// ============================================================================

pub use api::analysis::{
    ConstraintAnalysis, ConstraintJustification, DetailedConstraintMatch, EntityRef, Indictment,
    IndictmentMap, ScoreExplanation,
};

// ============================================================================
// Fluent Constraint Stream API
// ============================================================================

pub use stream::{
    BiConstraintStream, ConstraintBuilder, ConstraintFactory, CrossBiConstraintStream,
    GroupedConstraintStream, UniConstraintStream,
};
